//! Reservation status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tablehub_core::AppError;

/// Status of a reservation.
///
/// `Pending` is the initial state. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Requested by the guest, awaiting confirmation.
    Pending,
    /// Confirmed by the guest or by staff.
    Confirmed,
    /// The guest was seated; marked by staff.
    Completed,
    /// Cancelled by the guest or by staff.
    Cancelled,
}

impl ReservationStatus {
    /// Statuses that still occupy a table.
    pub const LIVE: [ReservationStatus; 2] = [Self::Pending, Self::Confirmed];

    /// All statuses, in lifecycle order.
    pub const ALL: [ReservationStatus; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Check if no further transition is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Check if the reservation still holds its table.
    pub fn is_live(&self) -> bool {
        !self.is_terminal()
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid reservation status: '{s}'. Expected one of: pending, confirmed, completed, cancelled"
            ))),
        }
    }
}
