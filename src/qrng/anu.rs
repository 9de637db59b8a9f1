//! ANU Quantum Random Number Generator backend
//!
//! Uses the Australian National University's QRNG API to get truly random numbers.
//! API documentation: https://qrng.anu.edu.au/contact/api-documentation/
//!
//! Two tiers:
//! - Free: https://qrng.anu.edu.au/API/jsonI.php (rate limited)
//! - Paid: https://api.quantumnumbers.anu.edu.au (requires API key)
//!
//! If an API key is provided, the paid endpoint is used automatically.

use crate::constants::api::{ANU_FREE_URL, ANU_PAID_URL};
use crate::constants::qrng::{BATCH_SIZE, DATA_TYPE};
use crate::error::{Error, Result};
use crate::qrng::QrngBackend;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// ANU QRNG backend
#[derive(Debug)]
pub struct AnuBackend {
    api_key: Option<String>,
    timeout: Duration,
}

/// Which API tier is being used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnuTier {
    Free,
    Paid,
}

/// ANU API response for uint16 type
///
/// Example: `{"success": true, "type": "uint16", "length": "3", "data": [60322, 1045, 33717]}`
#[derive(Debug, Deserialize)]
struct AnuResponse {
    success: bool,
    #[serde(default)]
    data: Option<Vec<u16>>,
    #[allow(dead_code)]
    r#type: Option<String>,
    /// Present on error responses: `{"success": false, "message": "..."}`
    #[serde(default)]
    message: Option<String>,
}

impl AnuBackend {
    /// Create a new ANU backend
    pub fn new() -> Self {
        Self {
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a new ANU backend with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the timeout applied to each request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get which API tier is being used
    pub fn tier(&self) -> AnuTier {
        match &self.api_key {
            Some(key) if !key.is_empty() => AnuTier::Paid,
            _ => AnuTier::Free,
        }
    }

    /// Build the request URL for a batch of `len` values
    fn url(&self, len: usize) -> String {
        let base = match self.tier() {
            AnuTier::Paid => ANU_PAID_URL,
            AnuTier::Free => ANU_FREE_URL,
        };
        format!("{}?length={}&type={}&size=1", base, len, DATA_TYPE)
    }
}

impl Default for AnuBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a decoded response and pull out exactly `len` values
fn extract_data(response: AnuResponse, len: usize) -> Result<Vec<u16>> {
    if !response.success {
        let msg = response
            .message
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(Error::Provider(format!("ANU API error: {}", msg)));
    }

    let data = response
        .data
        .ok_or_else(|| Error::Provider("ANU API returned no data".to_string()))?;

    if data.len() != len {
        return Err(Error::Provider(format!(
            "ANU API returned {} values, expected {}",
            data.len(),
            len
        )));
    }

    Ok(data)
}

impl QrngBackend for AnuBackend {
    fn name(&self) -> &'static str {
        "anu"
    }

    fn description(&self) -> &'static str {
        "Australian National University Quantum Random Number Generator"
    }

    fn batch(&self, len: usize) -> Result<Vec<u16>> {
        if len == 0 {
            return Ok(Vec::new());
        }
        if len > BATCH_SIZE {
            return Err(Error::Provider(format!(
                "ANU API serves at most {} values per request, asked for {}",
                BATCH_SIZE, len
            )));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Provider(format!("Failed to build HTTP client: {}", e)))?;

        let url = self.url(len);
        debug!(%url, "requesting ANU batch");

        let mut request = client.get(&url);
        if let (AnuTier::Paid, Some(key)) = (self.tier(), &self.api_key) {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .map_err(|e| Error::Provider(format!("ANU API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "ANU API returned status: {}",
                response.status()
            )));
        }

        let anu_response: AnuResponse = response
            .json()
            .map_err(|e| Error::Provider(format!("Failed to parse ANU response: {}", e)))?;

        extract_data(anu_response, len)
    }
}
