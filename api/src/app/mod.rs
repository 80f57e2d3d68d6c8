//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod course_service;
pub mod group_service;
pub mod lesson_service;
pub mod purchase_service;
pub mod user_service;

pub use course_service::CourseService;
pub use group_service::GroupService;
pub use lesson_service::LessonService;
pub use purchase_service::{PurchaseOutcome, PurchaseService};
pub use user_service::{hash_api_key, UserService};
