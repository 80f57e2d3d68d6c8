//! Authentication and authorization

pub mod api_key;
pub mod permissions;

pub use api_key::{auth_middleware, Caller};
pub use permissions::Permission;
