//! Shared application state

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::adapters::{
    PostgresBalanceRepository, PostgresCourseRepository, PostgresGroupRepository,
    PostgresLessonRepository, PostgresSubscriptionRepository, PostgresUserRepository,
};
use crate::app::{CourseService, GroupService, LessonService, PurchaseService, UserService};
use crate::config::Config;
use crate::domain::ports::{
    BalanceRepository, CourseRepository, GroupRepository, LessonRepository,
    SubscriptionRepository, UserRepository,
};

/// Repository handles the services are built from
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub lessons: Arc<dyn LessonRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub balances: Arc<dyn BalanceRepository>,
}

impl Repositories {
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            courses: Arc::new(PostgresCourseRepository::new(db.clone())),
            lessons: Arc::new(PostgresLessonRepository::new(db.clone())),
            groups: Arc::new(PostgresGroupRepository::new(db.clone())),
            subscriptions: Arc::new(PostgresSubscriptionRepository::new(db.clone())),
            balances: Arc::new(PostgresBalanceRepository::new(db)),
        }
    }
}

pub type DynUserService =
    UserService<dyn UserRepository, dyn BalanceRepository, dyn SubscriptionRepository>;
pub type DynPurchaseService =
    PurchaseService<dyn CourseRepository, dyn SubscriptionRepository, dyn BalanceRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<DynUserService>,
    pub course_service: Arc<CourseService<dyn CourseRepository>>,
    pub lesson_service: Arc<LessonService<dyn CourseRepository, dyn LessonRepository>>,
    pub group_service: Arc<GroupService<dyn CourseRepository, dyn GroupRepository>>,
    pub purchase_service: Arc<DynPurchaseService>,
}

impl AppState {
    pub fn new(repos: Repositories, config: &Config) -> Self {
        let user_service = Arc::new(UserService::new(
            repos.users.clone(),
            repos.balances.clone(),
            repos.subscriptions.clone(),
            config.initial_balance,
        ));

        let course_service = Arc::new(CourseService::new(repos.courses.clone()));

        let lesson_service = Arc::new(LessonService::new(
            repos.courses.clone(),
            repos.lessons.clone(),
        ));

        let group_service = Arc::new(GroupService::new(
            repos.courses.clone(),
            repos.groups.clone(),
        ));

        let purchase_service = Arc::new(PurchaseService::new(
            repos.courses,
            repos.subscriptions,
            repos.balances,
            config.initial_balance,
        ));

        Self {
            user_service,
            course_service,
            lesson_service,
            group_service,
            purchase_service,
        }
    }
}
