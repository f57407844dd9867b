//! Validated inputs for the reservation services.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use tablehub_core::error::AppError;
use tablehub_entity::reservation::{ReservationFields, ReservationStatus};

/// Everything a guest supplies when booking a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReservation {
    /// Restaurant to book at.
    pub restaurant_id: String,
    /// Restaurant display name, stored as a snapshot.
    pub restaurant_name: Option<String>,
    /// Seating instant.
    pub date: DateTime<Utc>,
    /// Party size.
    pub guest_count: i32,
    /// Requested table.
    pub table_number: i32,
    /// Guest note.
    pub special_requests: Option<String>,
    /// Contact phone.
    pub contact_phone: Option<String>,
    /// Contact name.
    pub contact_name: Option<String>,
}

/// A single update to an existing reservation.
///
/// Status changes and free-text edits are separate operations; a request
/// carrying both is rejected before it reaches the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationUpdate {
    /// Move to a new status.
    SetStatus(ReservationStatus),
    /// Edit free-text fields.
    SetFields(ReservationFields),
}

impl ReservationUpdate {
    /// Build an update from the loosely shaped request body.
    pub fn from_parts(
        status: Option<ReservationStatus>,
        fields: ReservationFields,
    ) -> Result<Self, AppError> {
        match (status, fields.is_empty()) {
            (Some(status), true) => Ok(Self::SetStatus(status)),
            (None, false) => Ok(Self::SetFields(fields)),
            (Some(_), false) => Err(AppError::validation(
                "Change the status and the reservation details in separate requests",
            )),
            (None, true) => Err(AppError::validation("Nothing to update")),
        }
    }
}

/// Earliest and latest calendar years accepted for a seating instant.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1970..=9999;

/// Parse a seating instant.
///
/// Accepts RFC 3339 (`2025-06-01T19:00:00+03:00`), a naive local form
/// (`2025-06-01T19:00`, read as UTC), or a bare date (midnight UTC).
/// Years outside [`SUPPORTED_YEARS`] are rejected.
pub fn parse_reservation_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation("Date is required"));
    }
    let instant =
        parse_instant(raw).ok_or_else(|| AppError::validation(format!("Invalid date: '{raw}'")))?;
    if !SUPPORTED_YEARS.contains(&instant.year()) {
        return Err(AppError::validation(format!(
            "Date '{raw}' is out of range; years {}..={} are accepted",
            SUPPORTED_YEARS.start(),
            SUPPORTED_YEARS.end()
        )));
    }
    Ok(instant)
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|day| day.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Trim free text; blank becomes absent.
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim an edit while keeping "clear this field" (`Some("")`) intact.
pub(crate) fn normalize_edit(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Reject notes longer than `max_len` characters.
pub(crate) fn check_note_length(note: Option<&str>, max_len: usize) -> Result<(), AppError> {
    match note {
        Some(note) if note.chars().count() > max_len => Err(AppError::validation(format!(
            "Special requests must be at most {max_len} characters"
        ))),
        _ => Ok(()),
    }
}
