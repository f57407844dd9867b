//! # tablehub-database
//!
//! Reservation persistence for TableHub: the [`ReservationStore`] contract,
//! a PostgreSQL implementation, an in-memory implementation for single-node
//! and test deployments, and connection/migration management.

pub mod connection;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::open_store;
pub use store::{InsertError, ReservationFilter, ReservationStore};
