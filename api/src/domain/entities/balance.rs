//! Balance domain entity
//!
//! A user's internal bonus account. One per user, created lazily.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::UserId;

/// Amount taken from the balance on every successful purchase.
///
/// This is a flat amount, independent of the course price the balance is
/// checked against.
pub const PURCHASE_DEDUCTION: i64 = 200;

#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    pub user_id: UserId,
    pub amount: i64,
    pub updated_at: DateTime<Utc>,
}

impl Balance {
    /// Check whether the balance covers the given price
    pub fn covers(&self, price: i64) -> bool {
        self.amount >= price
    }

    /// Amount left after a purchase has been charged
    pub fn after_purchase(&self) -> i64 {
        self.amount - PURCHASE_DEDUCTION
    }
}
