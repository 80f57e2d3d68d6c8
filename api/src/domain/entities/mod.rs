//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod balance;
pub mod course;
pub mod group;
pub mod lesson;
pub mod subscription;
pub mod user;

pub use balance::{Balance, PURCHASE_DEDUCTION};
pub use course::{Course, CourseId, CourseUpdate, NewCourse};
pub use group::{Group, GroupId, GroupUpdate, NewGroup};
pub use lesson::{Lesson, LessonId, LessonUpdate, NewLesson};
pub use subscription::{NewSubscription, Subscription, SubscriptionId};
pub use user::{NewUser, Role, User, UserId};
