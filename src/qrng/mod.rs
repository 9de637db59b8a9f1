//! QRNG (Quantum Random Number Generator) backends
//!
//! This module defines the `QrngBackend` trait, the batched `fetch` used by
//! the attractor pipeline, and implementations for the random sources.
//!
//! ## Flex Point
//! Adding a new QRNG backend requires:
//! 1. Create `src/qrng/{backend_name}.rs` implementing `QrngBackend`
//! 2. Add `pub mod {backend_name};` below
//! 3. Register it in `get_backend` and `available_backends`

pub mod anu;
pub mod pseudo;
pub mod retry;

use crate::constants::qrng::BATCH_SIZE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Trait for quantum random number generator backends
pub trait QrngBackend: Send + Sync {
    /// Returns the backend name (e.g., "pseudo", "anu")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this backend
    fn description(&self) -> &'static str;

    /// Request one batch of unsigned 16-bit integers
    ///
    /// Implementations must return exactly `len` values or fail with
    /// `Error::Provider`.
    fn batch(&self, len: usize) -> Result<Vec<u16>>;
}

/// Fetch `count` raw samples from a backend, one batch of `BATCH_SIZE` at a time
///
/// Batches are requested sequentially and concatenated in the order received,
/// since later stages pair consecutive samples. A failing batch fails the
/// whole fetch; retrying is left to the caller (see `retry::RetryingBackend`).
pub fn fetch(backend: &dyn QrngBackend, count: usize) -> Result<Vec<u16>> {
    if count == 0 || count % BATCH_SIZE != 0 {
        return Err(Error::Validation(format!(
            "sample count must be a positive multiple of {}, got {}",
            BATCH_SIZE, count
        )));
    }

    let mut samples = Vec::with_capacity(count);
    for batch_index in 1..=count / BATCH_SIZE {
        info!(
            "Getting {} out of {} random unsigned 16-bit integers from QRNG...",
            batch_index * BATCH_SIZE,
            count
        );

        let batch = backend.batch(BATCH_SIZE)?;
        if batch.len() != BATCH_SIZE {
            return Err(Error::Provider(format!(
                "{} returned {} values, expected {}",
                backend.name(),
                batch.len(),
                BATCH_SIZE
            )));
        }
        samples.extend(batch);
    }

    Ok(samples)
}

/// Information about a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name (used in config/CLI)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Get a backend by name
///
/// `api_key` selects the paid ANU tier when non-empty; `timeout` bounds each
/// remote call.
pub fn get_backend(
    name: &str,
    api_key: Option<&str>,
    timeout: Duration,
) -> Result<Box<dyn QrngBackend>> {
    match name.to_lowercase().as_str() {
        "pseudo" => Ok(Box::new(pseudo::PseudoBackend::new())),
        "anu" => {
            let backend = match api_key {
                Some(key) => anu::AnuBackend::with_api_key(key),
                None => anu::AnuBackend::new(),
            };
            Ok(Box::new(backend.with_timeout(timeout)))
        }
        _ => Err(Error::Config(format!("Unknown QRNG backend: {}", name))),
    }
}

/// List all available backends with their info
pub fn available_backends() -> Vec<BackendInfo> {
    vec![
        BackendInfo {
            name: "anu".to_string(),
            description: "Australian National University Quantum Random Number Generator"
                .to_string(),
        },
        BackendInfo {
            name: "pseudo".to_string(),
            description: "Pseudo-random number generator (for testing)".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns sequential values and counts calls
    struct CountingBackend {
        calls: AtomicUsize,
    }

    impl CountingBackend {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl QrngBackend for CountingBackend {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Counts batch calls"
        }

        fn batch(&self, len: usize) -> Result<Vec<u16>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..len).map(|i| (call * len + i) as u16).collect())
        }
    }

    struct ShortBackend;

    impl QrngBackend for ShortBackend {
        fn name(&self) -> &'static str {
            "short"
        }

        fn description(&self) -> &'static str {
            "Returns too few values"
        }

        fn batch(&self, len: usize) -> Result<Vec<u16>> {
            Ok(vec![7; len - 1])
        }
    }

    #[test]
    fn test_fetch_issues_one_call_per_batch() {
        let backend = CountingBackend::new();
        let samples = fetch(&backend, 4096).unwrap();

        assert_eq!(samples.len(), 4096);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_fetch_preserves_order() {
        let backend = CountingBackend::new();
        let samples = fetch(&backend, 2048).unwrap();

        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(*sample, i as u16);
        }
    }

    #[test]
    fn test_fetch_rejects_partial_batch() {
        let backend = CountingBackend::new();
        let result = fetch(&backend, 1000);

        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fetch_rejects_zero() {
        let backend = CountingBackend::new();
        assert!(matches!(fetch(&backend, 0), Err(Error::Validation(_))));
    }

    #[test]
    fn test_fetch_rejects_malformed_batch() {
        let result = fetch(&ShortBackend, 1024);
        assert!(matches!(result, Err(Error::Provider(_))));
    }

    #[test]
    fn test_get_backend() {
        let timeout = Duration::from_secs(5);
        assert_eq!(get_backend("anu", None, timeout).unwrap().name(), "anu");
        assert_eq!(get_backend("PSEUDO", None, timeout).unwrap().name(), "pseudo");
        assert!(matches!(
            get_backend("nope", None, timeout),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_available_backends() {
        let backends = available_backends();
        assert!(backends.iter().any(|b| b.name == "anu"));
        assert!(backends.iter().any(|b| b.name == "pseudo"));
    }
}
