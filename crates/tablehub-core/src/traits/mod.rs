//! Core traits defined in `tablehub-core` and implemented by other crates.

pub mod service;

pub use service::Service;
