//! Role guard for the staff routes.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use tablehub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Rejects callers below the staff role with 403.
///
/// The verified caller is stored in the request extensions so handlers
/// behind the guard do not decode the token a second time.
pub async fn require_staff(
    auth: AuthUser,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !auth.is_staff() {
        tracing::debug!(user_id = %auth.user_id, role = %auth.role.as_str(), "Staff route denied");
        return Err(AppError::forbidden("Staff or admin access required").into());
    }
    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}
