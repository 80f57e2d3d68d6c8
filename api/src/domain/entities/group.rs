//! Group domain entity
//!
//! A study group of a course. Managed by admins only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::course::validate_text;
use super::CourseId;
use crate::error::DomainError;

/// Unique identifier for a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GroupId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub id: GroupId,
    pub course_id: CourseId,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGroup {
    pub course_id: CourseId,
    pub title: String,
}

impl NewGroup {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupUpdate {
    pub title: Option<String>,
}

impl GroupUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.title {
            Some(title) => validate_text("title", title),
            None => Ok(()),
        }
    }

    pub fn apply(self, group: &mut Group) {
        if let Some(title) = self.title {
            group.title = title;
        }
    }
}
