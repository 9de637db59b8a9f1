//! Point-in-circle mapping
//!
//! Maps pairs of normalized samples to points uniformly distributed within a
//! circle around a starting position.

use crate::constants::geo::{EARTH_RADIUS_METERS, ONE_DEGREE_METERS};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use std::f64::consts::PI;

/// Map two normalized values to a point within `max_radius` meters of `start`
///
/// # Arguments
/// * `start` - Center of the circle
/// * `max_radius` - Radius in meters
/// * `u1` - Value in [0, 1) picking the distance
/// * `u2` - Value in [0, 1) picking the angle
///
/// # Algorithm
/// - r = max_radius * sqrt(u1)  -- sqrt gives uniform density per unit area
/// - theta = 2 * PI * u2
/// - dx = r cos(theta) (east), dy = r sin(theta) (north)
/// - Convert meters to degrees on a flat local approximation
///
/// Longitude degrees shrink with cos(latitude); near the poles the offset
/// grows without bound. Only small radii away from the poles are meaningful.
pub fn map_location(start: Coordinates, max_radius: f64, u1: f64, u2: f64) -> Coordinates {
    let r = max_radius * u1.sqrt();
    let theta = u2 * 2.0 * PI;
    let dx = r * theta.cos();
    let dy = r * theta.sin();

    let lat = start.lat + dy / ONE_DEGREE_METERS;
    let lng = start.lng + dx / (ONE_DEGREE_METERS * (start.lat * PI / 180.0).cos());

    Coordinates::new(lat, lng)
}

/// Map a sequence of normalized values, consumed pairwise in order
///
/// Produces `values.len() / 2` points. An odd-length sequence is rejected,
/// since it would leave a sample without a partner.
pub fn map_samples(start: Coordinates, max_radius: f64, values: &[f64]) -> Result<Vec<Coordinates>> {
    if values.len() % 2 != 0 {
        return Err(Error::Validation(format!(
            "cannot pair an odd number of samples ({})",
            values.len()
        )));
    }

    Ok(values
        .chunks_exact(2)
        .map(|pair| map_location(start, max_radius, pair[0], pair[1]))
        .collect())
}

/// Calculate the distance between two points in meters (Haversine formula)
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Check if a point is within a circle
pub fn is_in_circle(point: Coordinates, center: Coordinates, radius_meters: f64) -> bool {
    haversine_distance(point, center) <= radius_meters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::normalize::Normalizer;
    use crate::qrng::pseudo::SeededPseudoBackend;
    use crate::qrng::QrngBackend;
    use approx::assert_relative_eq;

    /// Distance in meters on the same flat approximation `map_location` uses
    fn local_distance(start: Coordinates, point: Coordinates) -> f64 {
        let dy = (point.lat - start.lat) * ONE_DEGREE_METERS;
        let dx = (point.lng - start.lng) * ONE_DEGREE_METERS * (start.lat * PI / 180.0).cos();
        dx.hypot(dy)
    }

    fn seeded_values(seed: u64, count: usize) -> Vec<f64> {
        let raw: Vec<u16> = SeededPseudoBackend::new(seed)
            .batch(count)
            .unwrap()
            .into_iter()
            .map(|r| r.min(u16::MAX - 1))
            .collect();
        Normalizer::default().normalize_all(&raw).unwrap()
    }

    #[test]
    fn test_zero_distance_is_start() {
        let start = Coordinates::new(40.0, -74.0);
        for u2 in [0.0, 0.25, 0.9] {
            assert_eq!(map_location(start, 5000.0, 0.0, u2), start);
        }
    }

    #[test]
    fn test_full_distance_zero_angle_is_due_east() {
        let start = Coordinates::new(40.0, -74.0);
        let radius = 1000.0;
        let point = map_location(start, radius, 1.0, 0.0);

        assert_eq!(point.lat, start.lat);
        assert!(point.lng > start.lng);
        assert_relative_eq!(local_distance(start, point), radius, max_relative = 1e-9);
    }

    #[test]
    fn test_quarter_turn_is_due_north() {
        let start = Coordinates::new(10.0, 20.0);
        let point = map_location(start, 500.0, 1.0, 0.25);

        assert_relative_eq!(point.lng, start.lng, epsilon = 1e-12);
        assert_relative_eq!(point.lat, start.lat + 500.0 / ONE_DEGREE_METERS, epsilon = 1e-12);
    }

    #[test]
    fn test_longitude_scaled_by_latitude() {
        let radius = 1000.0;
        let equator = map_location(Coordinates::new(0.0, 0.0), radius, 1.0, 0.0);
        let north = map_location(Coordinates::new(60.0, 0.0), radius, 1.0, 0.0);

        // cos(60°) = 0.5, so the same eastward offset spans twice the degrees
        assert_relative_eq!(north.lng, 2.0 * equator.lng, max_relative = 1e-9);
    }

    #[test]
    fn test_mapped_points_within_radius() {
        let start = Coordinates::new(40.7128, -74.0060);
        let radius = 1000.0;
        let points = map_samples(start, radius, &seeded_values(42, 4096)).unwrap();

        assert_eq!(points.len(), 2048);
        for point in &points {
            let distance = local_distance(start, *point);
            assert!(
                distance <= radius * (1.0 + 1e-9),
                "Point at distance {} exceeds radius {}",
                distance,
                radius
            );
            assert!(is_in_circle(*point, start, radius * 1.01));
        }
    }

    #[test]
    fn test_uniform_area_distribution() {
        // For a uniform disk, the expected average distance is 2R/3
        let start = Coordinates::new(0.0, 0.0);
        let radius = 10_000.0;
        let points = map_samples(start, radius, &seeded_values(12345, 20_000)).unwrap();

        let expected = 2.0 * radius / 3.0;
        let actual: f64 = points
            .iter()
            .map(|p| local_distance(start, *p))
            .sum::<f64>()
            / points.len() as f64;

        assert!(
            (actual - expected).abs() < expected * 0.05,
            "Average distance {} differs from expected {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_map_samples_rejects_odd_length() {
        let start = Coordinates::new(0.0, 0.0);
        assert!(matches!(
            map_samples(start, 100.0, &[0.1, 0.2, 0.3]),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_haversine_distance() {
        let nyc = Coordinates::new(40.7128, -74.0060);
        let nearby = Coordinates::new(41.7128, -74.0060);

        let distance = haversine_distance(nyc, nearby);
        assert!(
            (distance - 111_195.0).abs() < 100.0,
            "Distance {} should be approximately 111195",
            distance
        );
    }

    #[test]
    fn test_haversine_agrees_with_local_offsets() {
        let start = Coordinates::new(40.0, -74.0);
        for u2 in [0.0, 0.125, 0.25, 0.6] {
            let point = map_location(start, 100.0, 1.0, u2);
            assert_relative_eq!(haversine_distance(start, point), 100.0, max_relative = 1e-3);
        }
    }

    #[test]
    fn test_is_in_circle() {
        let center = Coordinates::new(40.7128, -74.0060);
        let radius = 1000.0;

        assert!(is_in_circle(center, center, radius));
        assert!(is_in_circle(Coordinates::new(40.7128 + 0.004, -74.0060), center, radius));
        assert!(!is_in_circle(Coordinates::new(40.7128 + 0.02, -74.0060), center, radius));
    }
}
