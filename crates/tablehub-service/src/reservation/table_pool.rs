//! Table pool: the numbered tables a restaurant offers.
//!
//! The fixed pool is a placeholder for real floor-plan data. Swapping in a
//! restaurant-specific [`TablePool`] leaves conflict detection and the
//! lifecycle untouched.

use std::fmt::Debug;

use tablehub_core::config::BookingConfig;

/// One table in a restaurant's pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    /// Table number.
    pub number: i32,
    /// Seats.
    pub capacity: i32,
    /// Seating area label.
    pub location: String,
}

/// Source of the tables a restaurant offers.
pub trait TablePool: Send + Sync + Debug + 'static {
    /// All tables of `restaurant_id`, ordered by number.
    fn tables(&self, restaurant_id: &str) -> Vec<TableSpec>;

    /// Whether `table_number` exists at `restaurant_id`.
    fn contains(&self, restaurant_id: &str, table_number: i32) -> bool {
        self.tables(restaurant_id)
            .iter()
            .any(|t| t.number == table_number)
    }
}

/// Tables `1..=table_count` for every restaurant, with capacity derived from
/// the table number and locations assigned round-robin.
#[derive(Debug, Clone)]
pub struct FixedTablePool {
    table_count: i32,
    locations: Vec<String>,
}

impl FixedTablePool {
    /// Create a pool of `table_count` tables.
    pub fn new(table_count: i32, locations: Vec<String>) -> Self {
        Self {
            table_count,
            locations,
        }
    }

    /// Build the pool from booking configuration.
    pub fn from_config(config: &BookingConfig) -> Self {
        Self::new(config.table_count, config.locations.clone())
    }

    /// Seats at table `number`.
    pub fn capacity_of(number: i32) -> i32 {
        (number % 4 + 2).clamp(2, 8)
    }

    fn location_of(&self, number: i32) -> String {
        if self.locations.is_empty() {
            return String::new();
        }
        let index = number.rem_euclid(self.locations.len() as i32) as usize;
        self.locations[index].clone()
    }
}

impl TablePool for FixedTablePool {
    fn tables(&self, _restaurant_id: &str) -> Vec<TableSpec> {
        (1..=self.table_count)
            .map(|number| TableSpec {
                number,
                capacity: Self::capacity_of(number),
                location: self.location_of(number),
            })
            .collect()
    }

    fn contains(&self, _restaurant_id: &str, table_number: i32) -> bool {
        (1..=self.table_count).contains(&table_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_cycle() {
        let capacities: Vec<i32> = (1..=8).map(FixedTablePool::capacity_of).collect();
        assert_eq!(capacities, vec![3, 4, 5, 2, 3, 4, 5, 2]);
    }

    #[test]
    fn test_default_pool_layout() {
        let pool = FixedTablePool::from_config(&BookingConfig::default());
        let tables = pool.tables("R1");
        assert_eq!(tables.len(), 20);
        assert_eq!(tables[0].location, "Terrace");
        assert_eq!(tables[3].location, "Main hall");
        assert!(pool.contains("R1", 20));
        assert!(!pool.contains("R1", 21));
        assert!(!pool.contains("R1", 0));
    }
}
