//! PostgreSQL adapter for SubscriptionRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{CourseId, NewSubscription, Subscription, SubscriptionId, UserId};
use crate::domain::ports::SubscriptionRepository;
use crate::entity::subscriptions;
use crate::error::DomainError;

/// PostgreSQL implementation of SubscriptionRepository
pub struct PostgresSubscriptionRepository {
    db: DatabaseConnection,
}

impl PostgresSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn create(&self, subscription: &NewSubscription) -> Result<Subscription, DomainError> {
        let model = subscriptions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(subscription.user_id.0),
            course_id: Set(subscription.course_id.0),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let results = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id.0))
            .order_by_asc(subscriptions::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn course_ids_for_user(&self, user_id: &UserId) -> Result<Vec<CourseId>, DomainError> {
        let ids: Vec<Uuid> = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id.0))
            .select_only()
            .column(subscriptions::Column::CourseId)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(ids.into_iter().map(CourseId).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<subscriptions::Model> for Subscription {
    fn from(model: subscriptions::Model) -> Self {
        Subscription {
            id: SubscriptionId(model.id),
            user_id: UserId(model.user_id),
            course_id: CourseId(model.course_id),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
