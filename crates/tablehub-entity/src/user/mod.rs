//! User domain values.
//!
//! Accounts are owned by the external identity service; only the role
//! carried in the bearer token matters here.

pub mod role;

pub use role::UserRole;
