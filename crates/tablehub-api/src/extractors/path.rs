//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use tablehub_core::error::AppError;
use tablehub_core::types::ReservationId;

use crate::error::ApiError;

/// A `{id}` path segment parsed as a [`ReservationId`].
#[derive(Debug, Clone, Copy)]
pub struct ReservationPath(pub ReservationId);

/// Parses a reservation id from a path segment.
pub fn parse_reservation_id(s: &str) -> Result<ReservationId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid reservation id: {s}")))
}

impl<S> FromRequestParts<S> for ReservationPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(parse_reservation_id(&raw)?))
    }
}
