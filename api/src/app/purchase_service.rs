//! Purchase service
//!
//! Buying courses with the internal bonus balance, and listing what is left to buy.
//!
//! The subscription and the charged balance are written in one transaction,
//! but the balance is read beforehand without a row lock, so two concurrent
//! purchases by the same user can both pass the balance check. Closing that needs an atomic
//! `UPDATE balances SET balance = balance - $1 WHERE user_id = $2 AND balance >= $3`.

use std::sync::Arc;

use crate::domain::entities::{Course, CourseId, NewSubscription, User};
use crate::domain::ports::{BalanceRepository, CourseRepository, SubscriptionRepository};
use crate::error::AppError;

/// Result of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Subscription created and balance charged
    Purchased { remaining: i64 },
    /// Balance below the course price, nothing changed
    InsufficientFunds { balance: i64, price: i64 },
}

/// Service for course purchases
pub struct PurchaseService<CR, SR, BR>
where
    CR: CourseRepository + ?Sized,
    SR: SubscriptionRepository + ?Sized,
    BR: BalanceRepository + ?Sized,
{
    courses: Arc<CR>,
    subscriptions: Arc<SR>,
    balances: Arc<BR>,
    initial_balance: i64,
}

impl<CR, SR, BR> PurchaseService<CR, SR, BR>
where
    CR: CourseRepository + ?Sized,
    SR: SubscriptionRepository + ?Sized,
    BR: BalanceRepository + ?Sized,
{
    pub fn new(
        courses: Arc<CR>,
        subscriptions: Arc<SR>,
        balances: Arc<BR>,
        initial_balance: i64,
    ) -> Self {
        Self {
            courses,
            subscriptions,
            balances,
            initial_balance,
        }
    }

    /// Buy access to a course
    ///
    /// The course lookup does not go through the not-found path the catalogue
    /// endpoints use: a missing course is an internal error.
    pub async fn pay(&self, user: &User, course_id: &CourseId) -> Result<PurchaseOutcome, AppError> {
        let course = self.courses.find_by_id(course_id).await?.ok_or_else(|| {
            AppError::Internal(format!("Course matching id {} does not exist", course_id))
        })?;

        let balance = self
            .balances
            .get_or_create(&user.id, self.initial_balance)
            .await?;

        if !balance.covers(course.price) {
            tracing::info!(
                user_id = %user.id,
                course_id = %course.id,
                balance = balance.amount,
                price = course.price,
                "Purchase declined: insufficient balance"
            );
            return Ok(PurchaseOutcome::InsufficientFunds {
                balance: balance.amount,
                price: course.price,
            });
        }

        let remaining = balance.after_purchase();
        self.balances
            .charge_and_subscribe(
                &NewSubscription {
                    user_id: user.id,
                    course_id: course.id,
                },
                remaining,
            )
            .await?;

        tracing::info!(
            user_id = %user.id,
            course_id = %course.id,
            remaining,
            "Course purchased"
        );

        Ok(PurchaseOutcome::Purchased { remaining })
    }

    /// Courses the user is not subscribed to yet
    pub async fn purchasable_courses(&self, user: &User) -> Result<Vec<Course>, AppError> {
        let owned = self.subscriptions.course_ids_for_user(&user.id).await?;
        Ok(self.courses.find_all_except(&owned).await?)
    }
}
