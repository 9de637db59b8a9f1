//! Grid-based density search
//!
//! Lays a square grid of evaluation nodes over the bounding box of the sample
//! set, evaluates a fitted KDE at each node, and picks the densest node.

use crate::coord::kde::{Bandwidth, GaussianKde};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default grid resolution (100x100 nodes covering the bounding box)
pub const DEFAULT_GRID_RESOLUTION: usize = 100;

/// Largest grid resolution accepted from configuration
pub const MAX_GRID_RESOLUTION: usize = 2000;

/// A grid of density values spanning a sample set's bounding box
///
/// Rows follow latitude, columns follow longitude. Both axes include the
/// bounding box edges.
#[derive(Debug)]
pub struct DensityGrid {
    /// Number of nodes in each dimension
    pub resolution: usize,
    /// Node latitudes, ascending
    pub lat_axis: Vec<f64>,
    /// Node longitudes, ascending
    pub lng_axis: Vec<f64>,
    /// Density per node, row-major
    pub values: Vec<f64>,
}

/// Evenly spaced values from `min` to `max`, `count >= 2`
fn axis(min: f64, max: f64, count: usize) -> Vec<f64> {
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + i as f64 * step).collect()
}

impl DensityGrid {
    /// Create an empty grid spanning the bounding box of `points`
    pub fn spanning(points: &[Coordinates], resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(Error::Validation(format!(
                "grid resolution must be at least 2, got {}",
                resolution
            )));
        }
        let node_count = resolution.checked_mul(resolution).ok_or_else(|| {
            Error::Validation(format!("grid resolution {} is too large", resolution))
        })?;
        if points.is_empty() {
            return Err(Error::DegenerateInput(
                "cannot build a grid over an empty sample set".to_string(),
            ));
        }

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        Ok(Self {
            resolution,
            lat_axis: axis(min_lat, max_lat, resolution),
            lng_axis: axis(min_lng, max_lng, resolution),
            values: vec![0.0; node_count],
        })
    }

    /// Evaluate `kde` at every node
    pub fn evaluate(&mut self, kde: &GaussianKde) {
        for (row, &lat) in self.lat_axis.iter().enumerate() {
            for (col, &lng) in self.lng_axis.iter().enumerate() {
                self.values[row * self.resolution + col] = kde.evaluate(Coordinates::new(lat, lng));
            }
        }
    }

    /// Density at a node
    pub fn density(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.resolution + col]
    }

    /// Coordinates of a node
    pub fn node_to_coords(&self, row: usize, col: usize) -> Coordinates {
        Coordinates::new(self.lat_axis[row], self.lng_axis[col])
    }
}

/// Result of a density node search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeResult {
    /// Grid row (latitude index)
    pub row: usize,
    /// Grid column (longitude index)
    pub col: usize,
    /// Estimated density at this node
    pub density: f64,
    /// Coordinates of this node
    pub coords: Coordinates,
}

/// Find the node with the highest density
///
/// Ties keep the first node in row-major order. NaN densities never win.
pub fn find_densest_node(grid: &DensityGrid) -> Option<NodeResult> {
    let mut best: Option<NodeResult> = None;

    for row in 0..grid.resolution {
        for col in 0..grid.resolution {
            let density = grid.density(row, col);
            if density.is_nan() {
                continue;
            }
            let dominated = best.as_ref().is_some_and(|b| b.density >= density);
            if !dominated {
                best = Some(NodeResult {
                    row,
                    col,
                    density,
                    coords: grid.node_to_coords(row, col),
                });
            }
        }
    }

    best
}

/// Estimate the densest point of a sample set
///
/// Fits a Gaussian KDE, evaluates it on a `resolution x resolution` grid over
/// the bounding box and returns the densest node.
pub fn estimate(points: &[Coordinates], resolution: usize, bandwidth: Bandwidth) -> Result<NodeResult> {
    info!("Calculating gaussian kernel density estimate...");
    let kde = GaussianKde::fit(points, bandwidth)?;
    debug!(
        points = kde.sample_count(),
        factor = kde.factor(),
        %bandwidth,
        "fitted kernel density estimate"
    );

    let mut grid = DensityGrid::spanning(points, resolution)?;
    grid.evaluate(&kde);

    find_densest_node(&grid).ok_or_else(|| {
        Error::DegenerateInput("density is undefined at every grid node".to_string())
    })
}
