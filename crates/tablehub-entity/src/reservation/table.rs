//! Bookable table option.

use serde::{Deserialize, Serialize};

/// A table offered to a guest by the availability query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOption {
    /// Table number within the pool.
    pub table_number: i32,
    /// Seats at the table.
    pub capacity: i32,
    /// Seating area label.
    pub location: String,
    /// Always `true` for returned options; busy tables are omitted.
    pub is_available: bool,
    /// Suggested time-of-day slots (`HH:MM`).
    pub available_times: Vec<String>,
}
