//! Pseudo-random backend for testing
//!
//! Uses the `rand` crate. This is NOT quantum random, but provides a fast,
//! offline backend for development and a seeded one for reproducible runs.

use crate::error::{Error, Result};
use crate::qrng::QrngBackend;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Pseudo-random number generator backend using the thread-local RNG
#[derive(Debug, Default)]
pub struct PseudoBackend;

impl PseudoBackend {
    /// Create a new pseudo-random backend
    pub fn new() -> Self {
        Self
    }
}

impl QrngBackend for PseudoBackend {
    fn name(&self) -> &'static str {
        "pseudo"
    }

    fn description(&self) -> &'static str {
        "Pseudo-random number generator (for testing)"
    }

    fn batch(&self, len: usize) -> Result<Vec<u16>> {
        let mut rng = rand::thread_rng();
        Ok((0..len).map(|_| rng.gen::<u16>()).collect())
    }
}

/// Seeded pseudo-random backend for deterministic testing
pub struct SeededPseudoBackend {
    rng: Mutex<rand::rngs::StdRng>,
}

impl SeededPseudoBackend {
    /// Create a new seeded pseudo-random backend
    ///
    /// Using the same seed will produce the same sequence of random values.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl QrngBackend for SeededPseudoBackend {
    fn name(&self) -> &'static str {
        "pseudo-seeded"
    }

    fn description(&self) -> &'static str {
        "Seeded pseudo-random number generator (for reproducible testing)"
    }

    fn batch(&self, len: usize) -> Result<Vec<u16>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::Provider("seeded RNG lock poisoned".to_string()))?;
        Ok((0..len).map(|_| rng.gen::<u16>()).collect())
    }
}
