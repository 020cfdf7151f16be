//! Pluggable token generation capability

use rand::Rng;

use crate::error::{DayTokenError, Result};

/// Produces a new token value on demand.
///
/// Implementations must return a string of exactly `width` ASCII decimal
/// digits, zero-padded. A real one-time-password algorithm (e.g. HMAC-based,
/// keyed by a shared secret and a time step) can be substituted here without
/// changing the lifecycle engine's contract. If the underlying randomness or
/// derivation source is unavailable, fail with
/// [`DayTokenError::GenerationUnavailable`]; the engine keeps the previous
/// credential and countdown unchanged.
pub trait TokenGenerator: Send {
    /// Generate a new token value of `width` decimal digits
    fn generate(&mut self, width: usize) -> Result<String>;
}

/// Placeholder generator drawing a uniform random value in `[0, 10^width)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandTokenGenerator;

impl TokenGenerator for RandTokenGenerator {
    fn generate(&mut self, width: usize) -> Result<String> {
        let modulus = 10u64.checked_pow(width as u32).ok_or_else(|| {
            DayTokenError::GenerationUnavailable(format!("token width {} too large", width))
        })?;
        let value = rand::thread_rng().gen_range(0..modulus);
        Ok(format!("{:0width$}", value, width = width))
    }
}

/// Check that a generated value honors the fixed-width digit contract
pub fn is_well_formed(value: &str, width: usize) -> bool {
    value.len() == width && value.bytes().all(|b| b.is_ascii_digit())
}
