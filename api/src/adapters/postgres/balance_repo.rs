//! PostgreSQL adapter for BalanceRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{Balance, NewSubscription, Subscription, UserId};
use crate::domain::ports::BalanceRepository;
use crate::entity::{balances, subscriptions};
use crate::error::DomainError;

/// PostgreSQL implementation of BalanceRepository
pub struct PostgresBalanceRepository {
    db: DatabaseConnection,
}

impl PostgresBalanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BalanceRepository for PostgresBalanceRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Balance>, DomainError> {
        let result = balances::Entity::find_by_id(user_id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn get_or_create(&self, user_id: &UserId, initial: i64) -> Result<Balance, DomainError> {
        let model = balances::ActiveModel {
            user_id: Set(user_id.0),
            balance: Set(initial),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        // A concurrent first purchase may have created the row already
        balances::Entity::insert(model)
            .on_conflict(
                OnConflict::column(balances::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.find_by_user(user_id).await?.ok_or_else(|| {
            DomainError::Internal(format!("Balance for user {} vanished after insert", user_id))
        })
    }

    async fn charge_and_subscribe(
        &self,
        subscription: &NewSubscription,
        remaining: i64,
    ) -> Result<Subscription, DomainError> {
        // Dropping the transaction without commit rolls it back
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let created = subscriptions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(subscription.user_id.0),
            course_id: Set(subscription.course_id.0),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(&txn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        let updated = balances::Entity::update_many()
            .col_expr(balances::Column::Balance, Expr::value(remaining))
            .col_expr(
                balances::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(balances::Column::UserId.eq(subscription.user_id.0))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if updated.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "Balance for user {} not found",
                subscription.user_id
            )));
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(created.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<balances::Model> for Balance {
    fn from(model: balances::Model) -> Self {
        Balance {
            user_id: UserId(model.user_id),
            amount: model.balance,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
