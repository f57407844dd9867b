//! Table reservation booking.

pub mod admin;
pub mod availability;
pub mod conflict;
pub mod input;
pub mod lifecycle;
pub mod number;
pub mod policy;
pub mod service;
pub mod table_pool;

pub use admin::AdminReservationService;
pub use availability::AvailabilityCalculator;
pub use conflict::ConflictDetector;
pub use input::{CreateReservation, ReservationUpdate, parse_reservation_date};
pub use lifecycle::{Actor, ReservationLifecycle};
pub use number::{RandomNumberGenerator, ReservationNumberGenerator};
pub use policy::{AuthorizationPolicy, OwnerPolicy, StaffPolicy};
pub use service::ReservationService;
pub use table_pool::{FixedTablePool, TablePool, TableSpec};

#[cfg(test)]
pub(crate) mod test_support;
