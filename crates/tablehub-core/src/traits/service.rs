//! Service marker trait.

/// Marker trait for business logic services.
///
/// Every service in `tablehub-service` implements this trait so the
/// binary can hold them uniformly behind `Arc`.
pub trait Service: Send + Sync + 'static {}
