//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod balance_repo;
pub mod course_repo;
pub mod group_repo;
pub mod lesson_repo;
pub mod subscription_repo;
pub mod user_repo;


pub use balance_repo::PostgresBalanceRepository;
pub use course_repo::PostgresCourseRepository;
pub use group_repo::PostgresGroupRepository;
pub use lesson_repo::PostgresLessonRepository;
pub use subscription_repo::PostgresSubscriptionRepository;
pub use user_repo::PostgresUserRepository;
