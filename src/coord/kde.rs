//! Two-dimensional Gaussian kernel density estimation
//!
//! The kernel covariance is the unbiased sample covariance of the points
//! scaled by the square of a bandwidth factor chosen by Silverman's or Scott's
//! rule. Axis 0 is latitude, axis 1 is longitude.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of dimensions the estimator works in
const DIMENSIONS: f64 = 2.0;

/// Bandwidth selection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// `(n (d + 2) / 4)^(-1 / (d + 4))`
    #[default]
    Silverman,
    /// `n^(-1 / (d + 4))`
    Scott,
}

impl Bandwidth {
    /// Bandwidth factor for `n` two-dimensional samples
    pub fn factor(&self, n: usize) -> f64 {
        let n = n as f64;
        let exponent = -1.0 / (DIMENSIONS + 4.0);
        match self {
            Self::Silverman => (n * (DIMENSIONS + 2.0) / 4.0).powf(exponent),
            Self::Scott => n.powf(exponent),
        }
    }
}

impl std::fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Silverman => write!(f, "silverman"),
            Self::Scott => write!(f, "scott"),
        }
    }
}

impl std::str::FromStr for Bandwidth {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silverman" => Ok(Self::Silverman),
            "scott" => Ok(Self::Scott),
            _ => Err(format!("Unknown bandwidth method: {}", s)),
        }
    }
}

/// A fitted Gaussian KDE over a set of coordinates
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<Coordinates>,
    /// Inverse of the kernel covariance, `[[a, b], [b, c]]` stored as `(a, b, c)`
    inv_cov: (f64, f64, f64),
    /// `n * 2π * sqrt(det(kernel covariance))`
    norm: f64,
    factor: f64,
}

impl GaussianKde {
    /// Fit a KDE to `points`
    ///
    /// Fails with `DegenerateInput` for fewer than two points, non-finite
    /// values, zero variance on either axis, or a singular covariance
    /// (all points on one line).
    pub fn fit(points: &[Coordinates], bandwidth: Bandwidth) -> Result<Self> {
        let n = points.len();
        if n < 2 {
            return Err(Error::DegenerateInput(format!(
                "need at least 2 points for density estimation, got {}",
                n
            )));
        }
        if points.iter().any(|p| !p.lat.is_finite() || !p.lng.is_finite()) {
            return Err(Error::DegenerateInput(
                "sample set contains non-finite coordinates".to_string(),
            ));
        }

        let count = n as f64;
        let mean_lat = points.iter().map(|p| p.lat).sum::<f64>() / count;
        let mean_lng = points.iter().map(|p| p.lng).sum::<f64>() / count;

        let (mut var_lat, mut var_lng, mut cov) = (0.0, 0.0, 0.0);
        for p in points {
            let dlat = p.lat - mean_lat;
            let dlng = p.lng - mean_lng;
            var_lat += dlat * dlat;
            var_lng += dlng * dlng;
            cov += dlat * dlng;
        }
        var_lat /= count - 1.0;
        var_lng /= count - 1.0;
        cov /= count - 1.0;

        if var_lat <= 0.0 || var_lng <= 0.0 {
            return Err(Error::DegenerateInput(format!(
                "sample set has zero variance (latitude {}, longitude {})",
                var_lat, var_lng
            )));
        }

        let factor = bandwidth.factor(n);
        let scale = factor * factor;
        let (a, b, c) = (var_lat * scale, cov * scale, var_lng * scale);
        let det = a * c - b * b;
        if !det.is_finite() || det <= 0.0 {
            return Err(Error::DegenerateInput(
                "sample covariance is singular".to_string(),
            ));
        }

        Ok(Self {
            points: points.to_vec(),
            inv_cov: (c / det, -b / det, a / det),
            norm: count * 2.0 * PI * det.sqrt(),
            factor,
        })
    }

    /// Bandwidth factor the covariance was scaled by
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Number of points the estimate was fitted on
    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    /// Estimated density at `at`
    pub fn evaluate(&self, at: Coordinates) -> f64 {
        let (a, b, c) = self.inv_cov;
        let sum: f64 = self
            .points
            .iter()
            .map(|p| {
                let dx = at.lat - p.lat;
                let dy = at.lng - p.lng;
                let mahalanobis = a * dx * dx + 2.0 * b * dx * dy + c * dy * dy;
                (-0.5 * mahalanobis).exp()
            })
            .sum();
        sum / self.norm
    }
}
