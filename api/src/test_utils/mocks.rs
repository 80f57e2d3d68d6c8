//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Balance, Course, CourseId, CourseUpdate, Group, GroupId, GroupUpdate, Lesson, LessonId,
    LessonUpdate, NewCourse, NewGroup, NewLesson, NewSubscription, NewUser, Subscription,
    SubscriptionId, User, UserId,
};
use crate::domain::ports::{
    BalanceRepository, CourseRepository, GroupRepository, LessonRepository,
    SubscriptionRepository, UserRepository,
};
use crate::error::DomainError;

fn page<T: Clone>(items: impl Iterator<Item = T>, limit: i64, offset: i64) -> Vec<T> {
    items.skip(offset as usize).take(limit as usize).collect()
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.api_key_hash == hash).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(DomainError::AlreadyExists(format!(
                "User with name '{}' already exists",
                new_user.username
            )));
        }

        let user = User {
            id: UserId::new(),
            username: new_user.username.clone(),
            role: new_user.role,
            api_key_hash: new_user.api_key_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

// ============================================================================
// In-Memory Course Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: Arc<RwLock<Vec<Course>>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a course for testing
    pub fn with_course(self, course: Course) -> Self {
        self.courses.write().unwrap().push(course);
        self
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let courses = self.courses.read().unwrap();
        Ok(courses.iter().find(|c| c.id == *id).cloned())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Course>, DomainError> {
        let courses = self.courses.read().unwrap();
        Ok(page(courses.iter().cloned(), limit, offset))
    }

    async fn find_all_except(&self, excluded: &[CourseId]) -> Result<Vec<Course>, DomainError> {
        let courses = self.courses.read().unwrap();
        Ok(courses
            .iter()
            .filter(|c| !excluded.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn create(&self, new_course: &NewCourse) -> Result<Course, DomainError> {
        let course = Course {
            id: CourseId::new(),
            author: new_course.author.clone(),
            title: new_course.title.clone(),
            start_date: new_course.start_date,
            price: new_course.price,
            created_at: Utc::now(),
        };
        self.courses.write().unwrap().push(course.clone());
        Ok(course)
    }

    async fn update(
        &self,
        id: &CourseId,
        update: &CourseUpdate,
    ) -> Result<Option<Course>, DomainError> {
        let mut courses = self.courses.write().unwrap();
        Ok(courses.iter_mut().find(|c| c.id == *id).map(|course| {
            update.clone().apply(course);
            course.clone()
        }))
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, DomainError> {
        let mut courses = self.courses.write().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != *id);
        Ok(courses.len() < before)
    }
}

// ============================================================================
// In-Memory Lesson Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryLessonRepository {
    lessons: Arc<RwLock<Vec<Lesson>>>,
}

impl InMemoryLessonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lesson(self, lesson: Lesson) -> Self {
        self.lessons.write().unwrap().push(lesson);
        self
    }
}

#[async_trait]
impl LessonRepository for InMemoryLessonRepository {
    async fn find_in_course(
        &self,
        course_id: &CourseId,
        id: &LessonId,
    ) -> Result<Option<Lesson>, DomainError> {
        let lessons = self.lessons.read().unwrap();
        Ok(lessons
            .iter()
            .find(|l| l.id == *id && l.course_id == *course_id)
            .cloned())
    }

    async fn find_by_course(
        &self,
        course_id: &CourseId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lesson>, DomainError> {
        let lessons = self.lessons.read().unwrap();
        Ok(page(
            lessons.iter().filter(|l| l.course_id == *course_id).cloned(),
            limit,
            offset,
        ))
    }

    async fn create(&self, new_lesson: &NewLesson) -> Result<Lesson, DomainError> {
        let lesson = Lesson {
            id: LessonId::new(),
            course_id: new_lesson.course_id,
            title: new_lesson.title.clone(),
            link: new_lesson.link.clone(),
            created_at: Utc::now(),
        };
        self.lessons.write().unwrap().push(lesson.clone());
        Ok(lesson)
    }

    async fn update(
        &self,
        id: &LessonId,
        update: &LessonUpdate,
    ) -> Result<Option<Lesson>, DomainError> {
        let mut lessons = self.lessons.write().unwrap();
        Ok(lessons.iter_mut().find(|l| l.id == *id).map(|lesson| {
            update.clone().apply(lesson);
            lesson.clone()
        }))
    }

    async fn delete(&self, id: &LessonId) -> Result<bool, DomainError> {
        let mut lessons = self.lessons.write().unwrap();
        let before = lessons.len();
        lessons.retain(|l| l.id != *id);
        Ok(lessons.len() < before)
    }
}

// ============================================================================
// In-Memory Group Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryGroupRepository {
    groups: Arc<RwLock<Vec<Group>>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(self, group: Group) -> Self {
        self.groups.write().unwrap().push(group);
        self
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_in_course(
        &self,
        course_id: &CourseId,
        id: &GroupId,
    ) -> Result<Option<Group>, DomainError> {
        let groups = self.groups.read().unwrap();
        Ok(groups
            .iter()
            .find(|g| g.id == *id && g.course_id == *course_id)
            .cloned())
    }

    async fn find_by_course(
        &self,
        course_id: &CourseId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Group>, DomainError> {
        let groups = self.groups.read().unwrap();
        Ok(page(
            groups.iter().filter(|g| g.course_id == *course_id).cloned(),
            limit,
            offset,
        ))
    }

    async fn create(&self, new_group: &NewGroup) -> Result<Group, DomainError> {
        let group = Group {
            id: GroupId::new(),
            course_id: new_group.course_id,
            title: new_group.title.clone(),
            created_at: Utc::now(),
        };
        self.groups.write().unwrap().push(group.clone());
        Ok(group)
    }

    async fn update(
        &self,
        id: &GroupId,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, DomainError> {
        let mut groups = self.groups.write().unwrap();
        Ok(groups.iter_mut().find(|g| g.id == *id).map(|group| {
            update.clone().apply(group);
            group.clone()
        }))
    }

    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError> {
        let mut groups = self.groups.write().unwrap();
        let before = groups.len();
        groups.retain(|g| g.id != *id);
        Ok(groups.len() < before)
    }
}

// ============================================================================
// In-Memory Subscription Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<Vec<Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, new_sub: &NewSubscription) -> Result<Subscription, DomainError> {
        let subscription = Subscription {
            id: SubscriptionId::new(),
            user_id: new_sub.user_id,
            course_id: new_sub.course_id,
            created_at: Utc::now(),
        };
        self.subscriptions
            .write()
            .unwrap()
            .push(subscription.clone());
        Ok(subscription)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let subscriptions = self.subscriptions.read().unwrap();
        Ok(subscriptions
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn course_ids_for_user(&self, user_id: &UserId) -> Result<Vec<CourseId>, DomainError> {
        let subscriptions = self.subscriptions.read().unwrap();
        let mut ids: Vec<CourseId> = Vec::new();
        for sub in subscriptions.iter().filter(|s| s.user_id == *user_id) {
            if !ids.contains(&sub.course_id) {
                ids.push(sub.course_id);
            }
        }
        Ok(ids)
    }
}

// ============================================================================
// In-Memory Balance Repository
// ============================================================================

/// Balances plus the subscription store purchases are recorded into
#[derive(Default)]
pub struct InMemoryBalanceRepository {
    balances: Arc<RwLock<HashMap<UserId, Balance>>>,
    subscriptions: Arc<InMemorySubscriptionRepository>,
    fail_writes: bool,
}

impl InMemoryBalanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a user's balance
    pub fn with_balance(self, user_id: UserId, amount: i64) -> Self {
        self.balances.write().unwrap().insert(
            user_id,
            Balance {
                user_id,
                amount,
                updated_at: Utc::now(),
            },
        );
        self
    }

    /// Record purchases into a shared subscription store
    pub fn with_subscriptions(mut self, subscriptions: Arc<InMemorySubscriptionRepository>) -> Self {
        self.subscriptions = subscriptions;
        self
    }

    /// Make every purchase write fail like a lost database connection
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

#[async_trait]
impl BalanceRepository for InMemoryBalanceRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Balance>, DomainError> {
        Ok(self.balances.read().unwrap().get(user_id).cloned())
    }

    async fn get_or_create(&self, user_id: &UserId, initial: i64) -> Result<Balance, DomainError> {
        let mut balances = self.balances.write().unwrap();
        let balance = balances.entry(*user_id).or_insert_with(|| Balance {
            user_id: *user_id,
            amount: initial,
            updated_at: Utc::now(),
        });
        Ok(balance.clone())
    }

    async fn charge_and_subscribe(
        &self,
        new_sub: &NewSubscription,
        remaining: i64,
    ) -> Result<Subscription, DomainError> {
        if self.fail_writes {
            return Err(DomainError::Database("connection reset".to_string()));
        }

        let mut balances = self.balances.write().unwrap();
        let balance = balances.get_mut(&new_sub.user_id).ok_or_else(|| {
            DomainError::NotFound(format!("Balance for user {} not found", new_sub.user_id))
        })?;

        let subscription = Subscription {
            id: SubscriptionId::new(),
            user_id: new_sub.user_id,
            course_id: new_sub.course_id,
            created_at: Utc::now(),
        };
        self.subscriptions
            .subscriptions
            .write()
            .unwrap()
            .push(subscription.clone());

        balance.amount = remaining;
        balance.updated_at = Utc::now();

        Ok(subscription)
    }
}
