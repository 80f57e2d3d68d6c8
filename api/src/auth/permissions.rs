//! Permission predicates
//!
//! Each predicate decides from the request method and the (optional) caller.
//! A denied anonymous caller gets 401, a denied authenticated caller 403.

use axum::http::Method;

use crate::domain::entities::User;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Any authenticated user
    IsAuthenticated,
    /// Admins only
    IsAdminUser,
    /// Students and admins
    IsStudentOrIsAdmin,
    /// Anyone may read, only admins may write
    ReadOnlyOrIsAdmin,
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl Permission {
    pub fn allows(&self, method: &Method, caller: Option<&User>) -> bool {
        match self {
            Permission::IsAuthenticated => caller.is_some(),
            Permission::IsAdminUser => caller.is_some_and(User::is_admin),
            Permission::IsStudentOrIsAdmin => {
                caller.is_some_and(|u| u.is_student() || u.is_admin())
            }
            Permission::ReadOnlyOrIsAdmin => {
                is_safe(method) || caller.is_some_and(User::is_admin)
            }
        }
    }

    pub fn check(&self, method: &Method, caller: Option<&User>) -> Result<(), AppError> {
        if self.allows(method, caller) {
            return Ok(());
        }
        match caller {
            None => Err(AppError::Unauthorized),
            Some(user) => {
                tracing::debug!(user_id = %user.id, permission = ?self, %method, "Permission denied");
                Err(AppError::Forbidden)
            }
        }
    }
}
