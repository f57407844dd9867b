//! Booking policy configuration.
//!
//! The conflict window itself is not configurable; see
//! `tablehub_entity::reservation::BOOKING_WINDOW`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest party size the reservation schema accepts.
pub const MAX_GUESTS_CEILING: i32 = 20;

/// Longest look-back the admin stats `recent` counter may use.
pub const MAX_STATS_RECENT_DAYS: i64 = 3650;

/// Booking policy settings shared by the reservation services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Size of the fixed table pool; tables are numbered `1..=table_count`.
    #[serde(default = "default_table_count")]
    pub table_count: i32,
    /// Location labels, assigned to tables round-robin.
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
    /// Suggested time slots (`HH:MM`) advertised for each available table.
    #[serde(default = "default_time_slots")]
    pub time_slots: Vec<String>,
    /// Upper bound for `guest_count`.
    #[serde(default = "default_max_guests")]
    pub max_guests: i32,
    /// Maximum length of the special requests note.
    #[serde(default = "default_special_requests_max_len")]
    pub special_requests_max_len: usize,
    /// How many reservation numbers to try before giving up on a create.
    #[serde(default = "default_number_attempts")]
    pub number_attempts: u32,
    /// Look-back window for the `recent` counter in admin stats.
    #[serde(default = "default_stats_recent_days")]
    pub stats_recent_days: i64,
    /// Default page size for owner listings.
    #[serde(default = "default_owner_page_limit")]
    pub owner_page_limit: u32,
    /// Default page size for staff listings.
    #[serde(default = "default_admin_page_limit")]
    pub admin_page_limit: u32,
    /// Hard cap on any requested page size.
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: u32,
}

impl BookingConfig {
    /// Check the settings for values the services cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.table_count < 1 {
            return Err(AppError::configuration(
                "booking.table_count must be at least 1",
            ));
        }
        if self.locations.is_empty() {
            return Err(AppError::configuration(
                "booking.locations must not be empty",
            ));
        }
        if !(1..=MAX_GUESTS_CEILING).contains(&self.max_guests) {
            return Err(AppError::configuration(format!(
                "booking.max_guests must be between 1 and {MAX_GUESTS_CEILING}"
            )));
        }
        if self.number_attempts == 0 {
            return Err(AppError::configuration(
                "booking.number_attempts must be at least 1",
            ));
        }
        if !(1..=MAX_STATS_RECENT_DAYS).contains(&self.stats_recent_days) {
            return Err(AppError::configuration(format!(
                "booking.stats_recent_days must be between 1 and {MAX_STATS_RECENT_DAYS}"
            )));
        }
        if self.max_page_limit == 0 {
            return Err(AppError::configuration(
                "booking.max_page_limit must be at least 1",
            ));
        }
        self.parsed_time_slots().map(|_| ())
    }

    /// Parse `time_slots` into times of day.
    pub fn parsed_time_slots(&self) -> Result<Vec<NaiveTime>, AppError> {
        self.time_slots
            .iter()
            .map(|slot| {
                NaiveTime::parse_from_str(slot, "%H:%M").map_err(|_| {
                    AppError::configuration(format!(
                        "booking.time_slots entry '{slot}' is not HH:MM"
                    ))
                })
            })
            .collect()
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            table_count: default_table_count(),
            locations: default_locations(),
            time_slots: default_time_slots(),
            max_guests: default_max_guests(),
            special_requests_max_len: default_special_requests_max_len(),
            number_attempts: default_number_attempts(),
            stats_recent_days: default_stats_recent_days(),
            owner_page_limit: default_owner_page_limit(),
            admin_page_limit: default_admin_page_limit(),
            max_page_limit: default_max_page_limit(),
        }
    }
}

fn default_table_count() -> i32 {
    20
}

fn default_locations() -> Vec<String> {
    ["Main hall", "Terrace", "VIP area", "Window"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_time_slots() -> Vec<String> {
    [
        "18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00", "21:30",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_max_guests() -> i32 {
    20
}

fn default_special_requests_max_len() -> usize {
    500
}

fn default_number_attempts() -> u32 {
    3
}

fn default_stats_recent_days() -> i64 {
    30
}

fn default_owner_page_limit() -> u32 {
    10
}

fn default_admin_page_limit() -> u32 {
    50
}

fn default_max_page_limit() -> u32 {
    100
}
