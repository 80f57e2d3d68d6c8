//! PostgreSQL adapter for GroupRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{CourseId, Group, GroupId, GroupUpdate, NewGroup};
use crate::domain::ports::GroupRepository;
use crate::entity::groups;
use crate::error::DomainError;

/// PostgreSQL implementation of GroupRepository
pub struct PostgresGroupRepository {
    db: DatabaseConnection,
}

impl PostgresGroupRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn find_in_course(
        &self,
        course_id: &CourseId,
        id: &GroupId,
    ) -> Result<Option<Group>, DomainError> {
        let result = groups::Entity::find_by_id(id.0)
            .filter(groups::Column::CourseId.eq(course_id.0))
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
    ) -> Result<Vec<Group>, DomainError> {
        let results = groups::Entity::find()
            .filter(groups::Column::CourseId.eq(course_id.0))
            .order_by_asc(groups::Column::CreatedAt)
            .offset(offset as u64)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, group: &NewGroup) -> Result<Group, DomainError> {
        let model = groups::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(group.course_id.0),
            title: Set(group.title.clone()),
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
        id: &GroupId,
        update: &GroupUpdate,
    ) -> Result<Option<Group>, DomainError> {
        let existing = groups::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: groups::ActiveModel = existing.into();
        if let Some(title) = &update.title {
            model.title = Set(title.clone());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(result.into()))
    }

    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError> {
        let result = groups::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

/// Convert SeaORM model to domain entity
impl From<groups::Model> for Group {
    fn from(model: groups::Model) -> Self {
        Group {
            id: GroupId(model.id),
            course_id: CourseId(model.course_id),
            title: model.title,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
