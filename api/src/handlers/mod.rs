//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

use serde::Deserialize;

pub mod courses;
pub mod groups;
pub mod lessons;
pub mod users;

pub use courses::{
    can_buy, create_course, delete_course, get_course, list_courses, patch_course, pay,
    replace_course,
};
pub use groups::{
    create_group, delete_group, get_group, list_groups, patch_group, replace_group,
};
pub use lessons::{
    create_lesson, delete_lesson, get_lesson, list_lessons, patch_lesson, replace_lesson,
};
pub use users::{me, register};

const MAX_PAGE_SIZE: i64 = 100;

/// Pagination parameters shared by list endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl ListQuery {
    pub fn limit(&self) -> i64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.max(0)
    }
}
