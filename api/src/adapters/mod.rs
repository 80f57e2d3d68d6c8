//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;

pub use postgres::{
    PostgresBalanceRepository, PostgresCourseRepository, PostgresGroupRepository,
    PostgresLessonRepository, PostgresSubscriptionRepository, PostgresUserRepository,
};
