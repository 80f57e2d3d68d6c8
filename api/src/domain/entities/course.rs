//! Course domain entity
//!
//! A purchasable course. Owns its lessons and groups.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum length of titles and author names
pub const MAX_TITLE_LEN: usize = 250;

/// Unique identifier for a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub Uuid);

impl CourseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CourseId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub author: String,
    pub title: String,
    pub start_date: NaiveDate,
    /// Price in bonus units
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new course
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub author: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub price: i64,
}

impl NewCourse {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_text("author", &self.author)?;
        validate_text("title", &self.title)?;
        validate_price(self.price)
    }
}

/// Partial course update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub author: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub price: Option<i64>,
}

impl CourseUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(author) = &self.author {
            validate_text("author", author)?;
        }
        if let Some(title) = &self.title {
            validate_text("title", title)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Apply the update to an existing course
    pub fn apply(self, course: &mut Course) {
        if let Some(author) = self.author {
            course.author = author;
        }
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(start_date) = self.start_date {
            course.start_date = start_date;
        }
        if let Some(price) = self.price {
            course.price = price;
        }
    }
}

impl From<NewCourse> for CourseUpdate {
    fn from(course: NewCourse) -> Self {
        Self {
            author: Some(course.author),
            title: Some(course.title),
            start_date: Some(course.start_date),
            price: Some(course.price),
        }
    }
}

/// Check a required text field of any catalogue entity
pub fn validate_text(field: &str, value: &str) -> Result<(), DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn validate_price(price: i64) -> Result<(), DomainError> {
    if price < 0 {
        return Err(DomainError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    Ok(())
}
