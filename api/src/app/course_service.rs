//! Course service
//!
//! Catalogue management for courses.

use std::sync::Arc;

use crate::domain::entities::{Course, CourseId, CourseUpdate, NewCourse};
use crate::domain::ports::CourseRepository;
use crate::error::AppError;

/// Service for managing courses
pub struct CourseService<CR>
where
    CR: CourseRepository + ?Sized,
{
    courses: Arc<CR>,
}

impl<CR> CourseService<CR>
where
    CR: CourseRepository + ?Sized,
{
    pub fn new(courses: Arc<CR>) -> Self {
        Self { courses }
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Course>, AppError> {
        Ok(self.courses.find_all(limit, offset).await?)
    }

    /// Get a course, failing with not-found when absent
    pub async fn get(&self, id: &CourseId) -> Result<Course, AppError> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))
    }

    pub async fn create(&self, course: NewCourse) -> Result<Course, AppError> {
        course.validate()?;
        let course = self.courses.create(&course).await?;
        tracing::debug!(course_id = %course.id, "Course created");
        Ok(course)
    }

    pub async fn update(&self, id: &CourseId, update: CourseUpdate) -> Result<Course, AppError> {
        update.validate()?;
        self.courses
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", id)))
    }

    /// Delete a course with its lessons and groups
    pub async fn delete(&self, id: &CourseId) -> Result<(), AppError> {
        if !self.courses.delete(id).await? {
            return Err(AppError::NotFound(format!("Course {} not found", id)));
        }
        tracing::debug!(course_id = %id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{new_course_input, test_course, InMemoryCourseRepository};

    fn create_service(repo: InMemoryCourseRepository) -> CourseService<InMemoryCourseRepository> {
        CourseService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn create_and_get() {
        let service = create_service(InMemoryCourseRepository::new());

        let created = service.create(new_course_input()).await.unwrap();
        let found = service.get(&created.id).await.unwrap();

        assert_eq!(found.title, created.title);
        assert_eq!(found.price, created.price);
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let service = create_service(InMemoryCourseRepository::new());
        let mut input = new_course_input();
        input.title = String::new();

        let err = service.create(input).await.unwrap_err();

        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_missing_course_is_not_found() {
        let service = create_service(InMemoryCourseRepository::new());

        let err = service.get(&CourseId::new()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_respects_limit_and_offset() {
        let service = create_service(
            InMemoryCourseRepository::new()
                .with_course(test_course())
                .with_course(test_course())
                .with_course(test_course()),
        );

        assert_eq!(service.list(2, 0).await.unwrap().len(), 2);
        assert_eq!(service.list(20, 2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_changes_price() {
        let course = test_course();
        let service = create_service(InMemoryCourseRepository::new().with_course(course.clone()));

        let updated = service
            .update(
                &course.id,
                CourseUpdate {
                    price: Some(42),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 42);
        assert_eq!(updated.title, course.title);
    }

    #[tokio::test]
    async fn update_missing_course_is_not_found() {
        let service = create_service(InMemoryCourseRepository::new());

        let err = service
            .update(&CourseId::new(), CourseUpdate::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_course() {
        let course = test_course();
        let service = create_service(InMemoryCourseRepository::new().with_course(course.clone()));

        service.delete(&course.id).await.unwrap();

        assert!(service.get(&course.id).await.is_err());
        assert!(service.delete(&course.id).await.is_err());
    }
}
