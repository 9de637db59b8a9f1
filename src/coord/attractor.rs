//! Attractor point generation
//!
//! Runs the whole pipeline for one request: draw raw samples from a QRNG
//! backend, normalize them, map consecutive pairs to points around the start,
//! then return the densest node of a kernel density estimate over those points.
//! Any failure aborts the run.

use crate::config::Config;
use crate::constants::qrng::{BATCH_SIZE, INT_BITS};
use crate::coord::density::{self, NodeResult, DEFAULT_GRID_RESOLUTION};
use crate::coord::kde::Bandwidth;
use crate::coord::normalize::{Normalizer, DEFAULT_PRECISION_BITS};
use crate::coord::point::{haversine_distance, is_in_circle, map_samples};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::qrng::retry::{RetryPolicy, RetryingBackend};
use crate::qrng::{self, get_backend, QrngBackend};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Parameters of one attractor request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractorRequest {
    /// Starting position
    pub center: Coordinates,
    /// Maximum distance of candidate points from the start, in meters
    pub radius: f64,
    /// Number of raw samples to draw (two per candidate point)
    pub num_points: usize,
}

impl AttractorRequest {
    pub fn new(center: Coordinates, radius: f64, num_points: usize) -> Self {
        Self {
            center,
            radius,
            num_points,
        }
    }

    /// Reject malformed requests before any sample is drawn
    pub fn validate(&self) -> Result<()> {
        self.center.validate()?;

        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::Validation(format!(
                "radius must be a positive number of meters, got {}",
                self.radius
            )));
        }
        if self.num_points == 0 || self.num_points % BATCH_SIZE != 0 {
            return Err(Error::Validation(format!(
                "num_points must be a positive multiple of {}, got {}",
                BATCH_SIZE, self.num_points
            )));
        }
        Ok(())
    }
}

/// Tunables for the estimation pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    /// Nodes per axis of the density grid
    pub grid_resolution: usize,
    /// Bandwidth rule for the KDE
    pub bandwidth: Bandwidth,
    /// Bits of precision taken from each raw sample
    pub precision_bits: u32,
    /// Retry policy for failed QRNG batches
    pub retry: RetryPolicy,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            bandwidth: Bandwidth::Silverman,
            precision_bits: DEFAULT_PRECISION_BITS,
            retry: RetryPolicy::none(),
        }
    }
}

impl PipelineSettings {
    /// Settings from the `[kde]` and `[qrng]` config sections
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            grid_resolution: config.kde.grid_resolution,
            bandwidth: config.bandwidth()?,
            precision_bits: config.kde.precision_bits,
            retry: RetryPolicy {
                max_retries: config.qrng.max_retries,
                initial_backoff: Duration::from_millis(config.qrng.retry_backoff_ms),
            },
        })
    }
}

/// Outcome of one attractor run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttractorResult {
    /// The request this result answers
    pub request: AttractorRequest,
    /// Backend the samples came from
    pub backend: String,
    /// Densest grid node
    pub attractor: Coordinates,
    /// Estimated density at the attractor
    pub density: f64,
    /// Grid position of the attractor (row, column)
    pub grid_node: (usize, usize),
    /// Number of candidate points the estimate was fitted on
    pub sample_count: usize,
    /// Great-circle distance from the start to the attractor in meters
    pub distance: f64,
    /// Whether the attractor lies within the search radius
    ///
    /// The grid spans the bounding box of the candidate points, so its
    /// corners can fall outside the circle.
    pub within_radius: bool,
}

/// Run the full pipeline for `request`
pub fn run(
    request: &AttractorRequest,
    backend: &dyn QrngBackend,
    settings: &PipelineSettings,
) -> Result<AttractorResult> {
    request.validate()?;
    let normalizer = Normalizer::new(INT_BITS, settings.precision_bits)?;

    let raw = if settings.retry.max_retries > 0 {
        qrng::fetch(&RetryingBackend::new(backend, settings.retry), request.num_points)?
    } else {
        qrng::fetch(backend, request.num_points)?
    };

    info!("Converting integers to coordinates...");
    let values = normalizer.normalize_all(&raw)?;
    let points = map_samples(request.center, request.radius, &values)?;

    let NodeResult {
        row,
        col,
        density,
        coords,
    } = density::estimate(&points, settings.grid_resolution, settings.bandwidth)?;

    info!("KDE coordinates: {}, {}", coords.lat, coords.lng);

    let within_radius = is_in_circle(coords, request.center, request.radius);
    if !within_radius {
        warn!(
            "Attractor {} lies outside the {} m search radius",
            coords, request.radius
        );
    }

    Ok(AttractorResult {
        request: *request,
        backend: backend.name().to_string(),
        attractor: coords,
        density,
        grid_node: (row, col),
        sample_count: points.len(),
        distance: haversine_distance(request.center, coords),
        within_radius,
    })
}

/// Find the attractor point using the backend and settings from `config`
pub fn get_coordinate(
    config: &Config,
    lat: f64,
    lng: f64,
    radius: f64,
    num_points: usize,
) -> Result<Coordinates> {
    let request = AttractorRequest::new(Coordinates::new(lat, lng), radius, num_points);
    let settings = PipelineSettings::from_config(config)?;
    let backend = get_backend(
        &config.defaults.backend,
        config.anu_api_key(),
        config.request_timeout(),
    )?;

    Ok(run(&request, backend.as_ref(), &settings)?.attractor)
}
