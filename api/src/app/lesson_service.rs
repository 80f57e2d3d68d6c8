//! Lesson service
//!
//! Lessons are always addressed through their parent course.

use std::sync::Arc;

use crate::domain::entities::{CourseId, Lesson, LessonId, LessonUpdate, NewLesson};
use crate::domain::ports::{CourseRepository, LessonRepository};
use crate::error::AppError;

/// Service for managing lessons of a course
pub struct LessonService<CR, LR>
where
    CR: CourseRepository + ?Sized,
    LR: LessonRepository + ?Sized,
{
    courses: Arc<CR>,
    lessons: Arc<LR>,
}

impl<CR, LR> LessonService<CR, LR>
where
    CR: CourseRepository + ?Sized,
    LR: LessonRepository + ?Sized,
{
    pub fn new(courses: Arc<CR>, lessons: Arc<LR>) -> Self {
        Self { courses, lessons }
    }

    /// Resolve the parent course or fail with not-found
    async fn require_course(&self, course_id: &CourseId) -> Result<(), AppError> {
        match self.courses.find_by_id(course_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!(
                "Course {} not found",
                course_id
            ))),
        }
    }

    pub async fn list(
        &self,
        course_id: &CourseId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lesson>, AppError> {
        self.require_course(course_id).await?;
        Ok(self.lessons.find_by_course(course_id, limit, offset).await?)
    }

    pub async fn get(&self, course_id: &CourseId, id: &LessonId) -> Result<Lesson, AppError> {
        self.require_course(course_id).await?;
        self.lessons
            .find_in_course(course_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson {} not found", id)))
    }

    pub async fn create(
        &self,
        course_id: &CourseId,
        title: String,
        link: String,
    ) -> Result<Lesson, AppError> {
        self.require_course(course_id).await?;

        let lesson = NewLesson {
            course_id: *course_id,
            title,
            link,
        };
        lesson.validate()?;

        Ok(self.lessons.create(&lesson).await?)
    }

    pub async fn update(
        &self,
        course_id: &CourseId,
        id: &LessonId,
        update: LessonUpdate,
    ) -> Result<Lesson, AppError> {
        update.validate()?;
        self.get(course_id, id).await?;
        self.lessons
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson {} not found", id)))
    }

    pub async fn delete(&self, course_id: &CourseId, id: &LessonId) -> Result<(), AppError> {
        self.get(course_id, id).await?;
        self.lessons.delete(id).await?;
        Ok(())
    }
}
