//! Reservation status state machine.
//!
//! ```text
//! pending ──► confirmed ──► completed (staff only)
//!    │            │
//!    ├────────────┴──────► cancelled
//!    └───────────────────► completed (staff only)
//! ```
//!
//! `completed` and `cancelled` are terminal.

use tablehub_core::error::AppError;
use tablehub_entity::reservation::ReservationStatus;

/// Who is asking for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The guest who owns the reservation.
    Owner,
    /// Restaurant staff or an administrator.
    Staff,
}

/// Legal transitions and who may invoke them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationLifecycle;

impl ReservationLifecycle {
    /// Validate `from -> to` for `actor`.
    pub fn transition(
        &self,
        from: ReservationStatus,
        to: ReservationStatus,
        actor: Actor,
    ) -> Result<(), AppError> {
        use ReservationStatus::*;

        match (from, to) {
            (Cancelled, Cancelled) => Err(AppError::terminal_state(
                "Reservation is already cancelled",
            )),
            (Completed | Cancelled, _) => Err(AppError::terminal_state(format!(
                "Reservation is {from} and can no longer change"
            ))),
            (_, Pending) => Err(AppError::validation(
                "A reservation cannot be moved back to pending",
            )),
            (a, b) if a == b => Err(AppError::validation(format!(
                "Reservation is already {to}"
            ))),
            (_, Completed) if actor == Actor::Owner => Err(AppError::forbidden(
                "Only staff can mark a reservation as completed",
            )),
            (Pending, Confirmed) | (Pending | Confirmed, Cancelled | Completed) => Ok(()),
            _ => Err(AppError::validation(format!(
                "Cannot change reservation status from {from} to {to}"
            ))),
        }
    }

    /// Free-text fields may change in any non-terminal status.
    pub fn ensure_editable(&self, status: ReservationStatus) -> Result<(), AppError> {
        if status.is_terminal() {
            return Err(AppError::terminal_state(format!(
                "Reservation is {status} and can no longer change"
            )));
        }
        Ok(())
    }
}
