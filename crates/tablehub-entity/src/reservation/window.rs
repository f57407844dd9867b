//! The booking window policy.
//!
//! Two live reservations for the same restaurant table may not have seating
//! instants within [`BOOKING_WINDOW`] of each other. The window is symmetric
//! and inclusive at both ends: bookings exactly two hours apart conflict.

use chrono::{DateTime, TimeDelta, Utc};

use tablehub_core::error::AppError;

/// Assumed seating duration plus turnover buffer.
pub const BOOKING_WINDOW: TimeDelta = TimeDelta::hours(2);

/// Half of [`BOOKING_WINDOW`].
///
/// The Postgres schema stores `[date - HALF, date + HALF]` per row; two such
/// closed ranges overlap exactly when the instants are within the full window.
pub const HALF_BOOKING_WINDOW: TimeDelta = TimeDelta::hours(1);

/// Closed interval `[instant - BOOKING_WINDOW, instant + BOOKING_WINDOW]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    /// Earliest conflicting instant.
    pub start: DateTime<Utc>,
    /// Latest conflicting instant.
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    /// The window of instants that would conflict with `instant`.
    ///
    /// Fails with a validation error when either bound falls outside the
    /// representable time range.
    pub fn around(instant: DateTime<Utc>) -> Result<Self, AppError> {
        match (
            instant.checked_sub_signed(BOOKING_WINDOW),
            instant.checked_add_signed(BOOKING_WINDOW),
        ) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(AppError::validation(format!(
                "Reservation date {instant} is out of range"
            ))),
        }
    }

    /// Check whether `other` falls inside the window (bounds included).
    pub fn contains(&self, other: DateTime<Utc>) -> bool {
        self.start <= other && other <= self.end
    }
}
