//! Reservation store implementations.

pub mod memory;
pub mod reservation;

pub use memory::MemoryReservationRepository;
pub use reservation::PgReservationRepository;
