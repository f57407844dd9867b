//! Guest reservation handlers. Every operation is scoped to the caller's own
//! bookings.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use validator::Validate;

use tablehub_core::error::AppError;
use tablehub_entity::reservation::{Reservation, TableOption};
use tablehub_service::reservation::parse_reservation_date;

use crate::dto::request::{
    AvailabilityQuery, CancelReservationRequest, CreateReservationRequest,
    ReservationListParams, UpdateReservationRequest,
};
use crate::dto::response::{ApiResponse, ListResponse, MessageResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthUser, ReservationPath, ValidatedJson};
use crate::state::AppState;

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Reservation>>)> {
    let reservation = state
        .reservation_service
        .create(&auth, req.into_input()?)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Reservation created", reservation)),
    ))
}

/// GET /api/reservations/my
pub async fn list_my_reservations(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Query(params), _): WithRejection<Query<ReservationListParams>, ApiError>,
) -> ApiResult<Json<ListResponse<Reservation>>> {
    let booking = state.reservation_service.config();
    let page = params.page_request(booking.owner_page_limit, booking.max_page_limit);
    let result = state
        .reservation_service
        .list_mine(&auth, params.status()?, page)
        .await?;
    Ok(Json(result.into()))
}

/// GET /api/reservations/{id}
pub async fn get_my_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ReservationPath(id): ReservationPath,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state.reservation_service.get_mine(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// GET /api/reservations/number/{number}
pub async fn get_my_reservation_by_number(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(number): Path<String>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state
        .reservation_service
        .get_mine_by_number(&auth, &number)
        .await?;
    Ok(Json(ApiResponse::ok(reservation)))
}

/// PUT /api/reservations/{id}
pub async fn update_my_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ReservationPath(id): ReservationPath,
    ValidatedJson(req): ValidatedJson<UpdateReservationRequest>,
) -> ApiResult<Json<ApiResponse<Reservation>>> {
    let reservation = state
        .reservation_service
        .update_mine(&auth, id, req.into_update()?)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Reservation updated",
        reservation,
    )))
}

/// DELETE /api/reservations/{id}
pub async fn cancel_my_reservation(
    State(state): State<AppState>,
    auth: AuthUser,
    ReservationPath(id): ReservationPath,
    WithRejection(body, _): WithRejection<Option<Json<CancelReservationRequest>>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let reason = cancel_reason(body)?;
    state
        .reservation_service
        .cancel_mine(&auth, id, reason)
        .await?;
    Ok(Json(MessageResponse::ok("Reservation cancelled")))
}

/// GET /api/reservations/available-tables/{restaurant_id}
pub async fn list_available_tables(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(restaurant_id): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<AvailabilityQuery>, ApiError>,
) -> ApiResult<Json<ApiResponse<Vec<TableOption>>>> {
    let raw_date = query
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::validation("Date is required"))?;
    let date = parse_reservation_date(raw_date)?;

    let tables = state
        .reservation_service
        .list_available_tables(&restaurant_id, date, query.guest_count)
        .await?;
    Ok(Json(ApiResponse::ok(tables)))
}

/// Validates an optional cancellation body and pulls out the reason.
pub(crate) fn cancel_reason(
    body: Option<Json<CancelReservationRequest>>,
) -> ApiResult<Option<String>> {
    match body {
        Some(Json(req)) => {
            req.validate()?;
            Ok(req.reason)
        }
        None => Ok(None),
    }
}
