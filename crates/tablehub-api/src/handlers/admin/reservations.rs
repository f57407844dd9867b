//! Staff reservation handlers: every guest's bookings, stats, and purge.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;

use tablehub_database::ReservationFilter;
use tablehub_entity::reservation::{Reservation, ReservationStats};

use crate::dto::request::{
    CancelReservationRequest, ReservationListParams, UpdateReservationRequest,
};
use crate::dto::response::{ApiResponse, ListResponse, MessageResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, ReservationPath, ValidatedJson};
use crate::handlers::reservation::cancel_reason;
use crate::state::AppState;

/// GET /api/admin/reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(params), _): WithRejection<Query<ReservationListParams>, ApiError>,
) -> ApiResult<Json<ListResponse<Reservation>>> {
    let booking = state.reservation_service.config();
    let page = params.page_request(booking.admin_page_limit, booking.max_page_limit);
    let filter = ReservationFilter {
        user_id: params.user_id,
        status: params.status()?,
        restaurant_id: params.restaurant_id(),
    };
    let result = state
        .admin_reservation_service
        .list(&auth, filter, page)
        .await?;
    Ok(Json(result.into()))
}

/// GET /api/admin/reservations/stats/summary
pub async fn reservation_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<ReservationStats>>> {
    let stats = state.admin_reservation_service.stats(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/admin/reservations/{id}
pub async fn get_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ReservationPath(id): ReservationPath,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.admin_reservation_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// GET /api/admin/reservations/number/{number}
pub async fn get_reservation_by_number(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(number): Path<String>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state
        .admin_reservation_service
        .get_by_number(&auth, &number)
        .await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// PUT /api/admin/reservations/{id}
pub async fn update_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ReservationPath(id): ReservationPath,
    ValidatedJson(req): ValidatedJson<UpdateReservationRequest>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state
        .admin_reservation_service
        .update(&auth, id, req.into_update()?)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Reservation updated",
        reservation,
    )))
}

/// DELETE /api/admin/reservations/{id}
pub async fn cancel_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ReservationPath(id): ReservationPath,
    WithRejection(body, _): WithRejection<Option<Json<CancelReservationRequest>>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let reason = cancel_reason(body)?;
    state
        .admin_reservation_service
        .cancel(&auth, id, reason)
        .await?;
    Ok(Json(MessageResponse::ok("Reservation cancelled")))
}

/// DELETE /api/admin/reservations/{id}/purge
pub async fn purge_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ReservationPath(id): ReservationPath,
) -> ApiResult<Json<MessageResponse>> {
    state.admin_reservation_service.purge(&auth, id).await?;
    Ok(Json(MessageResponse::ok("Reservation deleted")))
}
