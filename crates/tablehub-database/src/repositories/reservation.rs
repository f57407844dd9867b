//! PostgreSQL reservation repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::{PageRequest, PageResponse, ReservationId};
use tablehub_entity::reservation::window::HALF_BOOKING_WINDOW;
use tablehub_entity::reservation::{
    BookingWindow, NewReservation, RecordChange, Reservation, ReservationStats, ReservationStatus,
};

use crate::store::{InsertError, ReservationFilter, ReservationStore};

/// Columns mapped onto [`Reservation`]; `booking_window` stays in the database.
const COLUMNS: &str = "id, reservation_number, restaurant_id, restaurant_name, user_id, date, \
     guest_count, table_number, status, special_requests, contact_phone, contact_name, \
     created_at, updated_at";

/// SQLSTATE `exclusion_violation`.
const EXCLUSION_VIOLATION: &str = "23P01";
/// SQLSTATE `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// Name of the unique constraint on `reservation_number`.
const NUMBER_CONSTRAINT: &str = "reservations_reservation_number_key";

/// Repository for reservations backed by PostgreSQL.
///
/// The booking window is enforced by the `reservations_no_overlap`
/// exclusion constraint, so concurrent inserts cannot both succeed.
#[derive(Debug, Clone)]
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Classify an insert failure by the constraint it violated.
fn classify_insert_error(err: sqlx::Error, number: &str) -> InsertError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            Some(EXCLUSION_VIOLATION) => return InsertError::BookingConflict,
            Some(UNIQUE_VIOLATION) if db.constraint() == Some(NUMBER_CONSTRAINT) => {
                return InsertError::DuplicateNumber(number.to_string());
            }
            _ => {}
        }
    }
    InsertError::Store(AppError::with_source(
        ErrorKind::Database,
        "Failed to create reservation",
        err,
    ))
}

#[async_trait]
impl ReservationStore for PgReservationRepository {
    async fn insert(&self, data: NewReservation) -> Result<Reservation, InsertError> {
        let half_window_secs = HALF_BOOKING_WINDOW.num_seconds() as f64;
        sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservations (reservation_number, restaurant_id, restaurant_name, user_id, \
             date, guest_count, table_number, status, special_requests, contact_phone, contact_name, \
             booking_window) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8, $9, $10, \
             tstzrange($5 - make_interval(secs => $11), $5 + make_interval(secs => $11), '[]')) \
             RETURNING {COLUMNS}"
        ))
        .bind(&data.reservation_number)
        .bind(&data.restaurant_id)
        .bind(&data.restaurant_name)
        .bind(data.user_id)
        .bind(data.date)
        .bind(data.guest_count)
        .bind(data.table_number)
        .bind(&data.special_requests)
        .bind(&data.contact_phone)
        .bind(&data.contact_name)
        .bind(half_window_secs)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_insert_error(e, &data.reservation_number))
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find reservation", e))
    }

    async fn find_by_number(&self, number: &str) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE reservation_number = $1"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find reservation by number",
                e,
            )
        })
    }

    async fn find_page(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        const WHERE: &str = "($1::uuid IS NULL OR user_id = $1) \
             AND ($2::reservation_status IS NULL OR status = $2) \
             AND ($3::text IS NULL OR restaurant_id = $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM reservations WHERE {WHERE}"))
                .bind(filter.user_id)
                .bind(filter.status)
                .bind(&filter.restaurant_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
                })?;

        let items = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {COLUMNS} FROM reservations WHERE {WHERE} \
             ORDER BY date DESC, created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.user_id)
        .bind(filter.status)
        .bind(&filter.restaurant_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reservations", e))?;

        Ok(PageResponse::new(items, *page, total as u64))
    }

    async fn find_live_in_window(
        &self,
        restaurant_id: &str,
        table_number: Option<i32>,
        window: &BookingWindow,
    ) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {COLUMNS} FROM reservations \
             WHERE restaurant_id = $1 \
             AND ($2::int IS NULL OR table_number = $2) \
             AND status IN ('pending', 'confirmed') \
             AND date BETWEEN $3 AND $4 \
             ORDER BY table_number, date"
        ))
        .bind(restaurant_id)
        .bind(table_number)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query booking window", e)
        })
    }

    async fn apply_change(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        change: &RecordChange,
    ) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations SET \
             status = COALESCE($3, status), \
             special_requests = CASE WHEN $4::text IS NULL THEN special_requests ELSE NULLIF($4, '') END, \
             contact_phone = CASE WHEN $5::text IS NULL THEN contact_phone ELSE NULLIF($5, '') END, \
             contact_name = CASE WHEN $6::text IS NULL THEN contact_name ELSE NULLIF($6, '') END, \
             updated_at = NOW() \
             WHERE id = $1 AND status = $2 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(expected)
        .bind(change.status)
        .bind(&change.fields.special_requests)
        .bind(&change.fields.contact_phone)
        .bind(&change.fields.contact_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update reservation", e))
    }

    async fn delete(&self, id: ReservationId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete reservation", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, created_since: DateTime<Utc>) -> AppResult<ReservationStats> {
        sqlx::query_as::<_, ReservationStats>(
            "SELECT COUNT(*) AS total, \
             COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
             COUNT(*) FILTER (WHERE status = 'confirmed') AS confirmed, \
             COUNT(*) FILTER (WHERE status = 'completed') AS completed, \
             COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled, \
             COUNT(*) FILTER (WHERE created_at >= $1) AS recent \
             FROM reservations",
        )
        .bind(created_since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute reservation stats", e)
        })
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
