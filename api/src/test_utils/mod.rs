//! Test utilities
//!
//! In-memory port implementations and test fixtures.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

use std::sync::Arc;

use crate::state::Repositories;

/// Repositories backed entirely by memory, for router-level tests
pub fn in_memory_repositories(
    courses: InMemoryCourseRepository,
    lessons: InMemoryLessonRepository,
    groups: InMemoryGroupRepository,
    users: InMemoryUserRepository,
) -> Repositories {
    let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
    Repositories {
        users: Arc::new(users),
        courses: Arc::new(courses),
        lessons: Arc::new(lessons),
        groups: Arc::new(groups),
        subscriptions: subscriptions.clone(),
        balances: Arc::new(InMemoryBalanceRepository::new().with_subscriptions(subscriptions)),
    }
}
