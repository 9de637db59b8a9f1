//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default QRNG backend
pub const DEFAULT_BACKEND: &str = "anu";

/// Default search radius in meters
pub const DEFAULT_RADIUS: u32 = 5000;

/// Default number of random samples to draw
pub const DEFAULT_POINTS: usize = 4096;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default density grid resolution
pub const DEFAULT_GRID_RESOLUTION: usize = crate::coord::density::DEFAULT_GRID_RESOLUTION;

/// Largest accepted density grid resolution
pub const MAX_GRID_RESOLUTION: usize = crate::coord::density::MAX_GRID_RESOLUTION;

/// Default bandwidth selection rule
pub const DEFAULT_BANDWIDTH: &str = "silverman";

/// Default bits of precision taken from each sample
pub const DEFAULT_PRECISION_BITS: u32 = crate::coord::normalize::DEFAULT_PRECISION_BITS;

/// Largest accepted precision in bits
pub const MAX_PRECISION_BITS: u32 = crate::coord::normalize::MAX_WIDENED_BITS;

/// Default timeout for each QRNG request in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for a failed QRNG batch
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Default delay before the first retry in milliseconds
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "randonaut";
