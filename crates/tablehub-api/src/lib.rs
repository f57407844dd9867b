//! # tablehub-api
//!
//! HTTP API layer for TableHub built on Axum.
//!
//! Provides the reservation endpoints for guests and staff, middleware
//! (request logging, role guard, CORS, compression, timeouts), extractors,
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
