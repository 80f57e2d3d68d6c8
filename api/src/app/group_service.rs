//! Group service
//!
//! Study groups, addressed through their parent course.

use std::sync::Arc;

use crate::domain::entities::{CourseId, Group, GroupId, GroupUpdate, NewGroup};
use crate::domain::ports::{CourseRepository, GroupRepository};
use crate::error::AppError;

/// Service for managing groups of a course
pub struct GroupService<CR, GR>
where
    CR: CourseRepository + ?Sized,
    GR: GroupRepository + ?Sized,
{
    courses: Arc<CR>,
    groups: Arc<GR>,
}

impl<CR, GR> GroupService<CR, GR>
where
    CR: CourseRepository + ?Sized,
    GR: GroupRepository + ?Sized,
{
    pub fn new(courses: Arc<CR>, groups: Arc<GR>) -> Self {
        Self { courses, groups }
    }

    async fn require_course(&self, course_id: &CourseId) -> Result<(), AppError> {
        self.courses
            .find_by_id(course_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Course {} not found", course_id)))
    }

    pub async fn list(
        &self,
        course_id: &CourseId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Group>, AppError> {
        self.require_course(course_id).await?;
        Ok(self.groups.find_by_course(course_id, limit, offset).await?)
    }

    pub async fn get(&self, course_id: &CourseId, id: &GroupId) -> Result<Group, AppError> {
        self.require_course(course_id).await?;
        self.groups
            .find_in_course(course_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))
    }

    pub async fn create(&self, course_id: &CourseId, title: String) -> Result<Group, AppError> {
        self.require_course(course_id).await?;

        let group = NewGroup {
            course_id: *course_id,
            title,
        };
        group.validate()?;

        Ok(self.groups.create(&group).await?)
    }

    pub async fn update(
        &self,
        course_id: &CourseId,
        id: &GroupId,
        update: GroupUpdate,
    ) -> Result<Group, AppError> {
        update.validate()?;
        self.get(course_id, id).await?;
        self.groups
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))
    }

    pub async fn delete(&self, course_id: &CourseId, id: &GroupId) -> Result<(), AppError> {
        self.get(course_id, id).await?;
        self.groups.delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_course, InMemoryCourseRepository, InMemoryGroupRepository};

    fn create_service(
        courses: InMemoryCourseRepository,
    ) -> GroupService<InMemoryCourseRepository, InMemoryGroupRepository> {
        GroupService::new(Arc::new(courses), Arc::new(InMemoryGroupRepository::new()))
    }

    #[tokio::test]
    async fn create_and_list() {
        let course = test_course();
        let service = create_service(InMemoryCourseRepository::new().with_course(course.clone()));

        let group = service.create(&course.id, "Evening".to_string()).await.unwrap();
        let groups = service.list(&course.id, 20, 0).await.unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, group.id);
    }

    #[tokio::test]
    async fn create_under_missing_course_is_not_found() {
        let service = create_service(InMemoryCourseRepository::new());

        let err = service
            .create(&CourseId::new(), "Evening".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_title_rejected() {
        let course = test_course();
        let service = create_service(InMemoryCourseRepository::new().with_course(course.clone()));

        let result = service.create(&course.id, " ".to_string()).await;

        tokio_test::assert_err!(result);
    }

    #[tokio::test]
    async fn rename_group() {
        let course = test_course();
        let service = create_service(InMemoryCourseRepository::new().with_course(course.clone()));
        let group = service.create(&course.id, "Evening".to_string()).await.unwrap();

        let renamed = service
            .update(
                &course.id,
                &group.id,
                GroupUpdate {
                    title: Some("Morning".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(renamed.title, "Morning");
    }

    #[tokio::test]
    async fn delete_group() {
        let course = test_course();
        let service = create_service(InMemoryCourseRepository::new().with_course(course.clone()));
        let group = service.create(&course.id, "Evening".to_string()).await.unwrap();

        tokio_test::assert_ok!(service.delete(&course.id, &group.id).await);
        tokio_test::assert_err!(service.get(&course.id, &group.id).await);
    }
}
