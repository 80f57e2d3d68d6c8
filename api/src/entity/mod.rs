//! SeaORM entities
//!
//! Table models matching `migrations/0001_init.sql`.

pub mod balances;
pub mod courses;
pub mod groups;
pub mod lessons;
pub mod subscriptions;
pub mod users;
