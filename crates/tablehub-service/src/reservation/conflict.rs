//! Booking window conflict detection.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use tablehub_core::result::AppResult;
use tablehub_database::ReservationStore;
use tablehub_entity::reservation::BookingWindow;

/// Answers whether a table is already held by a live reservation within the
/// booking window around an instant.
///
/// This is a read-side check. The store's insert constraint is what makes
/// concurrent creates safe.
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    store: Arc<dyn ReservationStore>,
}

impl ConflictDetector {
    /// Creates a detector over `store`.
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    /// Whether `table_number` at `restaurant_id` is busy around `instant`.
    pub async fn has_conflict(
        &self,
        restaurant_id: &str,
        table_number: i32,
        instant: DateTime<Utc>,
    ) -> AppResult<bool> {
        let holders = self
            .store
            .find_live_in_window(
                restaurant_id,
                Some(table_number),
                &BookingWindow::around(instant)?,
            )
            .await?;
        Ok(!holders.is_empty())
    }

    /// Every table at `restaurant_id` for which [`Self::has_conflict`] would
    /// answer `true` at `instant`, from a single store read.
    pub async fn busy_tables(
        &self,
        restaurant_id: &str,
        instant: DateTime<Utc>,
    ) -> AppResult<BTreeSet<i32>> {
        let holders = self
            .store
            .find_live_in_window(restaurant_id, None, &BookingWindow::around(instant)?)
            .await?;
        Ok(holders.into_iter().map(|r| r.table_number).collect())
    }
}
