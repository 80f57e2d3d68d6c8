//! PostgreSQL adapter for CourseRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Course, CourseId, CourseUpdate, NewCourse};
use crate::domain::ports::CourseRepository;
use crate::entity::courses;
use crate::error::DomainError;

/// PostgreSQL implementation of CourseRepository
pub struct PostgresCourseRepository {
    db: DatabaseConnection,
}

impl PostgresCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, DomainError> {
        let result = courses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Course>, DomainError> {
        let results = courses::Entity::find()
            .order_by_asc(courses::Column::CreatedAt)
            .offset(offset as u64)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all_except(&self, excluded: &[CourseId]) -> Result<Vec<Course>, DomainError> {
        let mut query = courses::Entity::find().order_by_asc(courses::Column::CreatedAt);
        if !excluded.is_empty() {
            query = query.filter(courses::Column::Id.is_not_in(excluded.iter().map(|id| id.0)));
        }

        let results = query
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, course: &NewCourse) -> Result<Course, DomainError> {
        let model = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            author: Set(course.author.clone()),
            title: Set(course.title.clone()),
            start_date: Set(course.start_date),
            price: Set(course.price),
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
        id: &CourseId,
        update: &CourseUpdate,
    ) -> Result<Option<Course>, DomainError> {
        let existing = courses::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: courses::ActiveModel = existing.into();
        if let Some(author) = &update.author {
            model.author = Set(author.clone());
        }
        if let Some(title) = &update.title {
            model.title = Set(title.clone());
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(price) = update.price {
            model.price = Set(price);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(result.into()))
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, DomainError> {
        // Lessons, groups and subscriptions go with it (ON DELETE CASCADE)
        let result = courses::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Course {
            id: CourseId(model.id),
            author: model.author,
            title: model.title,
            start_date: model.start_date,
            price: model.price,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
