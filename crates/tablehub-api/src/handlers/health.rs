//! Health check handler.

use axum::Json;
use axum::extract::State;

use tablehub_core::error::AppError;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<HealthResponse>>> {
    let reachable = state.store.health_check().await.map_err(|e| {
        AppError::service_unavailable(format!("Reservation store unreachable: {}", e.message))
    })?;
    if !reachable {
        return Err(AppError::service_unavailable("Reservation store unreachable").into());
    }
    Ok(Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: "up".to_string(),
    })))
}
