//! The reservation store contract.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::types::{PageRequest, PageResponse, ReservationId, UserId};
use tablehub_entity::reservation::{
    BookingWindow, NewReservation, RecordChange, Reservation, ReservationStats, ReservationStatus,
};

/// Outcome of a rejected insert.
///
/// Both constraint violations are detected atomically by the store, inside
/// the same unit of work as the write.
#[derive(Debug, Error)]
pub enum InsertError {
    /// A live reservation already holds the table within the booking window.
    #[error("table is already booked within the booking window")]
    BookingConflict,
    /// The reservation number is already taken.
    #[error("reservation number '{0}' is already in use")]
    DuplicateNumber(String),
    /// Any other persistence failure.
    #[error(transparent)]
    Store(#[from] AppError),
}

/// Filter for paged listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Restrict to one owner.
    pub user_id: Option<UserId>,
    /// Restrict to one status.
    pub status: Option<ReservationStatus>,
    /// Restrict to one restaurant.
    pub restaurant_id: Option<String>,
}

impl ReservationFilter {
    /// Check whether `record` passes the filter.
    pub fn matches(&self, record: &Reservation) -> bool {
        self.user_id.is_none_or(|id| record.user_id == id)
            && self.status.is_none_or(|s| record.status == s)
            && self
                .restaurant_id
                .as_deref()
                .is_none_or(|r| record.restaurant_id == r)
    }
}

/// Durable keyed storage for reservations.
///
/// Implementations must enforce two constraints atomically on insert:
/// reservation numbers are unique, and no two live reservations for the same
/// restaurant table sit within the booking window of each other.
#[async_trait]
pub trait ReservationStore: Send + Sync + Debug + 'static {
    /// Persist a new `pending` reservation.
    async fn insert(&self, data: NewReservation) -> Result<Reservation, InsertError>;

    /// Point lookup by storage id.
    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>>;

    /// Point lookup by reservation number.
    async fn find_by_number(&self, number: &str) -> AppResult<Option<Reservation>>;

    /// Filtered page, newest seating date first.
    async fn find_page(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>>;

    /// Live reservations at `restaurant_id` whose date falls in `window`,
    /// optionally restricted to one table.
    async fn find_live_in_window(
        &self,
        restaurant_id: &str,
        table_number: Option<i32>,
        window: &BookingWindow,
    ) -> AppResult<Vec<Reservation>>;

    /// Compare-and-set update: applies `change` only while the record is
    /// still in `expected`. Returns `None` if the id is unknown or the status
    /// moved on.
    async fn apply_change(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        change: &RecordChange,
    ) -> AppResult<Option<Reservation>>;

    /// Physically remove a record. Returns whether it existed.
    async fn delete(&self, id: ReservationId) -> AppResult<bool>;

    /// Counts per status, plus records created at or after `created_since`.
    async fn stats(&self, created_since: DateTime<Utc>) -> AppResult<ReservationStats>;

    /// Check store reachability.
    async fn health_check(&self) -> AppResult<bool>;
}
