//! # tablehub-service
//!
//! Business logic service layer for TableHub. The reservation services
//! orchestrate the store, the conflict detector, availability, and the
//! status lifecycle for two callers: guests managing their own bookings and
//! staff managing every booking.
//!
//! Services follow constructor injection. All dependencies are provided at
//! construction time via `Arc` references.

pub mod context;
pub mod reservation;

pub use context::RequestContext;
pub use reservation::{
    AdminReservationService, AvailabilityCalculator, ConflictDetector, CreateReservation,
    ReservationLifecycle, ReservationService, ReservationUpdate,
};
