//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

use tablehub_core::error::AppError;
use tablehub_core::types::{PageRequest, UserId};
use tablehub_entity::reservation::{ReservationFields, ReservationStatus};
use tablehub_service::reservation::parse_reservation_date;
use tablehub_service::{CreateReservation, ReservationUpdate};

/// Book a table.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Restaurant to book at.
    #[validate(length(min = 1, message = "Restaurant is required"))]
    pub restaurant_id: String,
    /// Restaurant display name snapshot.
    #[validate(length(max = 200, message = "Restaurant name is too long"))]
    pub restaurant_name: Option<String>,
    /// Seating date and time.
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    /// Party size.
    #[validate(range(min = 1, max = 20, message = "Guest count must be between 1 and 20"))]
    pub guest_count: i32,
    /// Requested table.
    #[validate(range(min = 1, message = "Table number must be positive"))]
    pub table_number: i32,
    /// Guest note.
    #[validate(length(max = 500, message = "Special requests must be at most 500 characters"))]
    pub special_requests: Option<String>,
    /// Contact phone.
    #[validate(length(max = 32, message = "Contact phone is too long"))]
    pub contact_phone: Option<String>,
    /// Contact name.
    #[validate(length(max = 100, message = "Contact name is too long"))]
    pub contact_name: Option<String>,
}

impl CreateReservationRequest {
    /// Converts into the service input, parsing the date.
    pub fn into_input(self) -> Result<CreateReservation, AppError> {
        Ok(CreateReservation {
            restaurant_id: self.restaurant_id,
            restaurant_name: self.restaurant_name,
            date: parse_reservation_date(&self.date)?,
            guest_count: self.guest_count,
            table_number: self.table_number,
            special_requests: self.special_requests,
            contact_phone: self.contact_phone,
            contact_name: self.contact_name,
        })
    }
}

/// Change a reservation's status or its free-text details.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    /// New status.
    pub status: Option<ReservationStatus>,
    /// Guest note. An empty string clears it.
    #[validate(length(max = 500, message = "Special requests must be at most 500 characters"))]
    pub special_requests: Option<String>,
    /// Contact name. An empty string clears it.
    #[validate(length(max = 100, message = "Contact name is too long"))]
    pub contact_name: Option<String>,
    /// Contact phone. An empty string clears it.
    #[validate(length(max = 32, message = "Contact phone is too long"))]
    pub contact_phone: Option<String>,
}

impl UpdateReservationRequest {
    /// Converts the flat body into a single tagged update.
    pub fn into_update(self) -> Result<ReservationUpdate, AppError> {
        ReservationUpdate::from_parts(
            self.status,
            ReservationFields {
                special_requests: self.special_requests,
                contact_phone: self.contact_phone,
                contact_name: self.contact_name,
            },
        )
    }
}

/// Optional body of a cancellation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CancelReservationRequest {
    /// Why the reservation was cancelled.
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Query for free tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// Desired seating date and time.
    pub date: Option<String>,
    /// Party size, used to filter by capacity.
    pub guest_count: Option<i32>,
}

/// Filters and paging for reservation lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListParams {
    /// Status filter; `all` or empty means no filter.
    pub status: Option<String>,
    /// Restaurant filter (staff only).
    pub restaurant_id: Option<String>,
    /// Guest filter (staff only).
    pub user_id: Option<UserId>,
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

impl ReservationListParams {
    /// Parses the status filter.
    pub fn status(&self) -> Result<Option<ReservationStatus>, AppError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }

    /// Resolves paging against the given default and cap.
    pub fn page_request(&self, default_limit: u32, max_limit: u32) -> PageRequest {
        PageRequest::resolve(self.page, self.limit, default_limit, max_limit)
    }

    /// Restaurant filter with blanks dropped.
    pub fn restaurant_id(&self) -> Option<String> {
        self.restaurant_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
