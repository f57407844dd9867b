//! Reservation domain entities.

pub mod model;
pub mod stats;
pub mod status;
pub mod table;
pub mod window;

pub use model::{NewReservation, RecordChange, Reservation, ReservationFields};
pub use stats::ReservationStats;
pub use status::ReservationStatus;
pub use table::TableOption;
pub use window::{BOOKING_WINDOW, BookingWindow};
