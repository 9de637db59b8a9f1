//! Centralized constants for the randonaut crate

/// Geographic constants
pub mod geo {
    use std::f64::consts::PI;

    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Mean Earth radius in meters (used by the haversine distance)
    pub const EARTH_RADIUS_METERS: f64 = EARTH_RADIUS_KM * 1000.0;

    /// Meters per degree of latitude on the flat local approximation (~111,195 m)
    pub const ONE_DEGREE_METERS: f64 = EARTH_RADIUS_KM * 2.0 * PI / 360.0 * 1000.0;
}

/// QRNG provider constants
pub mod qrng {
    /// Number of values the provider returns per call
    pub const BATCH_SIZE: usize = 1024;

    /// Bit width of each raw sample (uint16)
    pub const INT_BITS: u32 = 16;

    /// Data type requested from the provider
    pub const DATA_TYPE: &str = "uint16";
}

/// External API endpoints
pub mod api {
    /// ANU QRNG free tier
    pub const ANU_FREE_URL: &str = "https://qrng.anu.edu.au/API/jsonI.php";

    /// ANU QRNG paid tier (requires API key)
    pub const ANU_PAID_URL: &str = "https://api.quantumnumbers.anu.edu.au";
}
