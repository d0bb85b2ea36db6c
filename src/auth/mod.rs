//! Authentication: JWT service, claims and the request extractor.

mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};

use crate::utils::AppError;

/// Gate for admin-only operations
pub fn ensure_admin(user: &CurrentUser) -> Result<(), AppError> {
    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, "admin access denied");
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}
