//! Authorization policies for the two service profiles.

use std::fmt::Debug;

use tablehub_core::types::UserId;
use tablehub_database::ReservationFilter;
use tablehub_entity::reservation::Reservation;

use super::lifecycle::Actor;

/// Decides which reservations a caller may see and touch.
pub trait AuthorizationPolicy: Send + Sync + Debug {
    /// The lifecycle actor this policy acts as.
    fn actor(&self) -> Actor;

    /// Narrow a listing filter to what the caller may see.
    fn scope(&self, filter: ReservationFilter) -> ReservationFilter;

    /// Whether the caller may read or mutate `record`. A `false` answer is
    /// reported as not-found, never as forbidden.
    fn can_access(&self, record: &Reservation) -> bool;
}

/// Guests see only their own reservations.
#[derive(Debug, Clone, Copy)]
pub struct OwnerPolicy {
    user_id: UserId,
}

impl OwnerPolicy {
    /// Scope everything to `user_id`.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl AuthorizationPolicy for OwnerPolicy {
    fn actor(&self) -> Actor {
        Actor::Owner
    }

    fn scope(&self, filter: ReservationFilter) -> ReservationFilter {
        ReservationFilter {
            user_id: Some(self.user_id),
            ..filter
        }
    }

    fn can_access(&self, record: &Reservation) -> bool {
        record.user_id == self.user_id
    }
}

/// Staff see everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaffPolicy;

impl AuthorizationPolicy for StaffPolicy {
    fn actor(&self) -> Actor {
        Actor::Staff
    }

    fn scope(&self, filter: ReservationFilter) -> ReservationFilter {
        filter
    }

    fn can_access(&self, _record: &Reservation) -> bool {
        true
    }
}
