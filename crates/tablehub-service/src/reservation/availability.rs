//! Available table enumeration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use tablehub_core::result::AppResult;
use tablehub_entity::reservation::TableOption;

use super::conflict::ConflictDetector;
use super::table_pool::TablePool;

/// Lists the tables of a restaurant that are free around an instant and big
/// enough for the party.
///
/// Busy tables come from the shared [`ConflictDetector`]. The attached time
/// slots are a fixed suggestion list, not a per-slot availability check.
#[derive(Debug, Clone)]
pub struct AvailabilityCalculator {
    detector: ConflictDetector,
    pool: Arc<dyn TablePool>,
    time_slots: Vec<String>,
}

impl AvailabilityCalculator {
    /// Creates a calculator over `pool`, sharing `detector` with the writers.
    pub fn new(detector: ConflictDetector, pool: Arc<dyn TablePool>, time_slots: Vec<String>) -> Self {
        Self {
            detector,
            pool,
            time_slots,
        }
    }

    /// The table pool this calculator enumerates.
    pub fn pool(&self) -> &Arc<dyn TablePool> {
        &self.pool
    }

    /// Free tables at `restaurant_id` around `instant`, filtered to
    /// `capacity >= party_size` when a party size is given.
    pub async fn list_available(
        &self,
        restaurant_id: &str,
        instant: DateTime<Utc>,
        party_size: Option<i32>,
    ) -> AppResult<Vec<TableOption>> {
        let busy = self.detector.busy_tables(restaurant_id, instant).await?;

        let options: Vec<TableOption> = self
            .pool
            .tables(restaurant_id)
            .into_iter()
            .filter(|table| !busy.contains(&table.number))
            .filter(|table| party_size.is_none_or(|size| table.capacity >= size))
            .map(|table| TableOption {
                table_number: table.number,
                capacity: table.capacity,
                location: table.location,
                is_available: true,
                available_times: self.time_slots.clone(),
            })
            .collect();

        debug!(
            restaurant_id = %restaurant_id,
            busy = busy.len(),
            available = options.len(),
            "Computed table availability"
        );
        Ok(options)
    }
}
