//! Cryptographically sourced random values.
//!
//! Every draw goes through [`RandomSource`] so handlers can be driven by a
//! deterministic source in tests while production uses the OS entropy pool.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of mantissa bits in an `f64`.
const UNIT_FLOAT_BITS: u32 = 53;

#[derive(Debug, Error)]
pub enum RandomError {
    #[error("entropy source failed: {0}")]
    Entropy(#[from] rand::Error),

    #[error("upper bound must be greater than zero")]
    EmptyRange,
}

pub trait RandomSource: Send + Sync {
    /// Uniform value in `[0, 1)` with 53 bits of precision.
    fn next_unit_float(&self) -> Result<f64, RandomError>;

    /// Uniform integer in `[0, bound)`.
    fn next_below(&self, bound: u64) -> Result<u64, RandomError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl OsRandom {
    pub fn new() -> Self {
        Self
    }

    fn next_u64(&self) -> Result<u64, RandomError> {
        let mut bytes = [0u8; 8];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }
}

impl RandomSource for OsRandom {
    fn next_unit_float(&self) -> Result<f64, RandomError> {
        let bits = self.next_u64()? >> (64 - UNIT_FLOAT_BITS);
        Ok(bits_to_unit_float(bits))
    }

    fn next_below(&self, bound: u64) -> Result<u64, RandomError> {
        if bound == 0 {
            return Err(RandomError::EmptyRange);
        }

        // Reject the tail above the largest multiple of `bound` so every
        // residue is equally likely.
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let candidate = self.next_u64()?;
            if candidate < zone {
                return Ok(candidate % bound);
            }
        }
    }
}

fn bits_to_unit_float(bits: u64) -> f64 {
    bits as f64 / (1u64 << UNIT_FLOAT_BITS) as f64
}
