//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;

pub use repositories::{
    BalanceRepository, CourseRepository, GroupRepository, LessonRepository,
    SubscriptionRepository, UserRepository,
};
