//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Balance, Course, CourseId, CourseUpdate, Group, GroupId, GroupUpdate, Lesson, LessonId,
    LessonUpdate, NewCourse, NewGroup, NewLesson, NewSubscription, NewUser, Subscription, User,
    UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by API key hash
    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for Course entities
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find a course by ID
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError>;

    /// List courses, oldest first
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Course>, DomainError>;

    /// List every course whose ID is not in `excluded`
    async fn find_all_except(&self, excluded: &[CourseId]) -> Result<Vec<Course>, DomainError>;

    /// Create a new course
    async fn create(&self, course: &NewCourse) -> Result<Course, DomainError>;

    /// Apply an update, returning the stored course (None if it does not exist)
    async fn update(
        &self,
        id: &CourseId,
        update: &CourseUpdate,
    ) -> Result<Option<Course>, DomainError>;

    /// Delete a course together with its lessons and groups.
    /// Returns false when the course did not exist.
    async fn delete(&self, id: &CourseId) -> Result<bool, DomainError>;
}

/// Repository for Lesson entities
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Find a lesson by ID within a course
    async fn find_in_course(
        &self,
        course_id: &CourseId,
        id: &LessonId,
    ) -> Result<Option<Lesson>, DomainError>;

    /// List lessons of a course
    async fn find_by_course(
        &self,
        course_id: &CourseId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lesson>, DomainError>;

    /// Create a new lesson
    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, DomainError>;

    /// Apply an update to a lesson
    async fn update(
        &self,
        id: &LessonId,
        update: &LessonUpdate,
    ) -> Result<Option<Lesson>, DomainError>;

    /// Delete a lesson
    async fn delete(&self, id: &LessonId) -> Result<bool, DomainError>;
}

/// Repository for Group entities
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find a group by ID within a course
    async fn find_in_course(
        &self,
        course_id: &CourseId,
        id: &GroupId,
    ) -> Result<Option<Group>, DomainError>;

    /// List groups of a course
    async fn find_by_course(
        &self,
        course_id: &CourseId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Group>, DomainError>;

    /// Create a new group
    async fn create(&self, group: &NewGroup) -> Result<Group, DomainError>;

    /// Apply an update to a group
    async fn update(
        &self,
        id: &GroupId,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, DomainError>;

    /// Delete a group
    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError>;
}

/// Repository for Subscription entities
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Create a new subscription
    async fn create(&self, subscription: &NewSubscription) -> Result<Subscription, DomainError>;

    /// List all subscriptions of a user
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError>;

    /// IDs of the courses a user is subscribed to
    async fn course_ids_for_user(&self, user_id: &UserId) -> Result<Vec<CourseId>, DomainError>;
}

/// Repository for Balance entities
#[async_trait]
pub trait BalanceRepository: Send + Sync {
    /// Find the balance of a user
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Balance>, DomainError>;

    /// Return the balance of a user, creating it with `initial` when missing
    async fn get_or_create(&self, user_id: &UserId, initial: i64) -> Result<Balance, DomainError>;

    /// Record a purchase: create the subscription and set the buyer's balance
    /// to `remaining` as one unit of work. Nothing is written on failure.
    async fn charge_and_subscribe(
        &self,
        subscription: &NewSubscription,
        remaining: i64,
    ) -> Result<Subscription, DomainError>;
}
