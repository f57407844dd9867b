//! Staff handlers. Mounted behind the staff role guard.

pub mod reservations;
