//! # tablehub-auth
//!
//! Verification of bearer tokens issued by the platform's identity service.
//! TableHub never issues credentials; it only turns a valid token into the
//! caller identity (user id and role) the reservation services act on.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder};
