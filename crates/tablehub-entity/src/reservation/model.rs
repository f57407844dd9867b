//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tablehub_core::types::{ReservationId, UserId};

use super::status::ReservationStatus;
use super::window::BookingWindow;

/// A table reservation.
///
/// Only `status` and the three free-text fields change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Storage-assigned identifier.
    pub id: ReservationId,
    /// Human-facing unique number (`RES-<epoch ms>-<10 x base36>`).
    pub reservation_number: String,
    /// Restaurant owned by the catalog service.
    pub restaurant_id: String,
    /// Restaurant display name captured at booking time.
    pub restaurant_name: Option<String>,
    /// Owner of the reservation.
    pub user_id: UserId,
    /// Requested seating instant.
    pub date: DateTime<Utc>,
    /// Party size.
    pub guest_count: i32,
    /// Table within the restaurant's pool.
    pub table_number: i32,
    /// Current lifecycle status.
    pub status: ReservationStatus,
    /// Free-text note from the guest (or cancellation reason).
    pub special_requests: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// Contact name.
    pub contact_name: Option<String>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Check whether this reservation blocks `table_number` at `restaurant_id`
    /// for the given window.
    pub fn occupies(&self, restaurant_id: &str, table_number: i32, window: &BookingWindow) -> bool {
        self.status.is_live()
            && self.table_number == table_number
            && self.restaurant_id == restaurant_id
            && window.contains(self.date)
    }
}

/// Data required to persist a new reservation.
///
/// The store assigns `id`, timestamps, and the initial `pending` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    /// Pre-generated reservation number.
    pub reservation_number: String,
    /// Restaurant identifier.
    pub restaurant_id: String,
    /// Restaurant display name snapshot.
    pub restaurant_name: Option<String>,
    /// Owner.
    pub user_id: UserId,
    /// Seating instant.
    pub date: DateTime<Utc>,
    /// Party size.
    pub guest_count: i32,
    /// Table number.
    pub table_number: i32,
    /// Guest note.
    pub special_requests: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// Contact name.
    pub contact_name: Option<String>,
}

/// Partial edit of the free-text fields.
///
/// `None` leaves a field untouched; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationFields {
    /// New special requests note.
    pub special_requests: Option<String>,
    /// New contact phone.
    pub contact_phone: Option<String>,
    /// New contact name.
    pub contact_name: Option<String>,
}

impl ReservationFields {
    /// Check if no field is being edited.
    pub fn is_empty(&self) -> bool {
        self.special_requests.is_none() && self.contact_phone.is_none() && self.contact_name.is_none()
    }

    /// Apply the edit to `record` in place.
    pub fn apply_to(&self, record: &mut Reservation) {
        fn merge(target: &mut Option<String>, value: &Option<String>) {
            if let Some(value) = value {
                *target = (!value.is_empty()).then(|| value.clone());
            }
        }
        merge(&mut record.special_requests, &self.special_requests);
        merge(&mut record.contact_phone, &self.contact_phone);
        merge(&mut record.contact_name, &self.contact_name);
    }
}

/// A validated mutation handed to the store's compare-and-set update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordChange {
    /// New status, if the lifecycle approved a transition.
    pub status: Option<ReservationStatus>,
    /// Free-text edits.
    pub fields: ReservationFields,
}

impl RecordChange {
    /// A status-only change.
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            fields: ReservationFields::default(),
        }
    }

    /// A field-only change.
    pub fn fields(fields: ReservationFields) -> Self {
        Self {
            status: None,
            fields,
        }
    }
}
