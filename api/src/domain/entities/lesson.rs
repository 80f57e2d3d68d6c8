//! Lesson domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::course::validate_text;
use super::CourseId;
use crate::error::DomainError;

/// Unique identifier for a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LessonId(pub Uuid);

impl LessonId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LessonId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for LessonId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lesson, always owned by exactly one course
#[derive(Debug, Clone, Serialize)]
pub struct Lesson {
    pub id: LessonId,
    pub course_id: CourseId,
    pub title: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub course_id: CourseId,
    pub title: String,
    pub link: String,
}

impl NewLesson {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_text("title", &self.title)?;
        validate_text("link", &self.link)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub link: Option<String>,
}

impl LessonUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            validate_text("title", title)?;
        }
        if let Some(link) = &self.link {
            validate_text("link", link)?;
        }
        Ok(())
    }

    pub fn apply(self, lesson: &mut Lesson) {
        if let Some(title) = self.title {
            lesson.title = title;
        }
        if let Some(link) = self.link {
            lesson.link = link;
        }
    }
}
