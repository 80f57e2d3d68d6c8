//! PostgreSQL adapter for LessonRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{CourseId, Lesson, LessonId, LessonUpdate, NewLesson};
use crate::domain::ports::LessonRepository;
use crate::entity::lessons;
use crate::error::DomainError;

/// PostgreSQL implementation of LessonRepository
pub struct PostgresLessonRepository {
    db: DatabaseConnection,
}

impl PostgresLessonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LessonRepository for PostgresLessonRepository {
    async fn find_in_course(
        &self,
        course_id: &CourseId,
        id: &LessonId,
    ) -> Result<Option<Lesson>, DomainError> {
        let result = lessons::Entity::find_by_id(id.0)
            .filter(lessons::Column::CourseId.eq(course_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_course(
        &self,
        course_id: &CourseId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lesson>, DomainError> {
        let results = lessons::Entity::find()
            .filter(lessons::Column::CourseId.eq(course_id.0))
            .order_by_asc(lessons::Column::CreatedAt)
            .offset(offset as u64)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, lesson: &NewLesson) -> Result<Lesson, DomainError> {
        let model = lessons::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(lesson.course_id.0),
            title: Set(lesson.title.clone()),
            link: Set(lesson.link.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &LessonId,
        update: &LessonUpdate,
    ) -> Result<Option<Lesson>, DomainError> {
        let existing = lessons::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: lessons::ActiveModel = existing.into();
        if let Some(title) = &update.title {
            model.title = Set(title.clone());
        }
        if let Some(link) = &update.link {
            model.link = Set(link.clone());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(result.into()))
    }

    async fn delete(&self, id: &LessonId) -> Result<bool, DomainError> {
        let result = lessons::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl From<lessons::Model> for Lesson {
    fn from(model: lessons::Model) -> Self {
        Lesson {
            id: LessonId(model.id),
            course_id: CourseId(model.course_id),
            title: model.title,
            link: model.link,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
