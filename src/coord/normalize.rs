//! Raw sample normalization
//!
//! Widens a W-bit provider sample into a `k·W`-bit integer by repeating it
//! `k` times, then divides by `2^(k·W) - 1` to land in [0, 1). `k` is the
//! smallest number of W-bit chunks covering the requested precision, so with
//! 16-bit samples and 1 bit of precision `k = 1`.

use crate::constants::qrng::INT_BITS;
use crate::error::{Error, Result};

/// Default precision requested from each sample, in bits
pub const DEFAULT_PRECISION_BITS: u32 = 1;

/// Widest integer a sample can be widened to
pub const MAX_WIDENED_BITS: u32 = u128::BITS;

/// Converts raw samples of a fixed bit width into floats in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    int_bits: u32,
    chunks: u32,
    max_value: u128,
}

impl Normalizer {
    /// Create a normalizer for `int_bits`-wide samples and `precision_bits` of precision
    ///
    /// The widened value must fit in 128 bits.
    pub fn new(int_bits: u32, precision_bits: u32) -> Result<Self> {
        if int_bits == 0 || precision_bits == 0 {
            return Err(Error::Validation(
                "sample width and precision must be at least 1 bit".to_string(),
            ));
        }

        let chunks = precision_bits.div_ceil(int_bits).max(1);
        let total_bits = chunks
            .checked_mul(int_bits)
            .filter(|&bits| bits <= MAX_WIDENED_BITS)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "{} bits of precision from {}-bit samples needs more than {} bits",
                    precision_bits, int_bits, MAX_WIDENED_BITS
                ))
            })?;

        let max_value = if total_bits == MAX_WIDENED_BITS {
            u128::MAX
        } else {
            (1u128 << total_bits) - 1
        };

        Ok(Self {
            int_bits,
            chunks,
            max_value,
        })
    }

    /// Number of W-bit chunks each sample is widened to
    pub fn chunks(&self) -> u32 {
        self.chunks
    }

    /// The modulus samples are divided by
    pub fn max_value(&self) -> u128 {
        self.max_value
    }

    /// Normalize one raw sample
    ///
    /// Fails with `NormalizationOverflow` when the widened value reaches the
    /// modulus (with the default settings, only the raw value `u16::MAX`).
    pub fn normalize(&self, raw: u16) -> Result<f64> {
        let mut num: u128 = 0;
        for _ in 0..self.chunks {
            // A single 128-bit chunk shifts out entirely
            num = num.checked_shl(self.int_bits).unwrap_or(0) | u128::from(raw);
        }

        if num >= self.max_value {
            return Err(Error::NormalizationOverflow {
                value: num,
                modulus: self.max_value,
            });
        }

        Ok(num as f64 / self.max_value as f64)
    }

    /// Normalize a whole sequence, failing on the first overflow
    pub fn normalize_all(&self, raw: &[u16]) -> Result<Vec<f64>> {
        raw.iter().map(|&r| self.normalize(r)).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            int_bits: INT_BITS,
            chunks: 1,
            max_value: (1u128 << INT_BITS) - 1,
        }
    }
}
