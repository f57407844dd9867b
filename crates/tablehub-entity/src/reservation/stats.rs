//! Reservation counters for the staff dashboard.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reservation counts by status plus recently created reservations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ReservationStats {
    /// All reservations.
    pub total: i64,
    /// In `pending`.
    pub pending: i64,
    /// In `confirmed`.
    pub confirmed: i64,
    /// In `completed`.
    pub completed: i64,
    /// In `cancelled`.
    pub cancelled: i64,
    /// Created within the trailing look-back window.
    pub recent: i64,
}
