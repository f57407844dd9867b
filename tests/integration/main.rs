//! HTTP integration tests, run against the router with the in-memory store.

mod admin_test;
mod health_test;
mod helpers;
mod reservation_test;
