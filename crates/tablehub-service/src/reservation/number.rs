//! Reservation number generation.
//!
//! Numbers look like `RES-1748804400000-4K9ZQ0M2XA`: the creation instant in
//! epoch milliseconds followed by ten random base36 characters. Uniqueness is
//! enforced by the store; callers regenerate on collision.

use std::fmt::Debug;

use chrono::Utc;
use rand::Rng;

/// Prefix shared by every reservation number.
pub const NUMBER_PREFIX: &str = "RES";

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 10;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Produces human-facing reservation numbers.
pub trait ReservationNumberGenerator: Send + Sync + Debug + 'static {
    /// Produce a candidate number. May collide; the store decides.
    fn generate(&self) -> String;
}

/// Timestamp plus thread-local random suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNumberGenerator;

impl ReservationNumberGenerator for RandomNumberGenerator {
    fn generate(&self) -> String {
        format!(
            "{NUMBER_PREFIX}-{}-{}",
            Utc::now().timestamp_millis(),
            random_suffix(&mut rand::rng())
        )
    }
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Check that `candidate` has the `RES-<digits>-<10 x [A-Z0-9]>` shape.
pub fn is_well_formed(candidate: &str) -> bool {
    let mut parts = candidate.splitn(3, '-');
    let (Some(prefix), Some(millis), Some(suffix)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    prefix == NUMBER_PREFIX
        && !millis.is_empty()
        && millis.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == SUFFIX_LEN
        && suffix
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}
