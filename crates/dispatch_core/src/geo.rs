//! Geographic primitives: coordinates and great-circle distance.
//!
//! Distances are haversine on a sphere of radius [`EARTH_RADIUS_M`]. Latitude and
//! longitude ranges are not validated here; callers own their inputs.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for every distance in the crate (metres).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in metres.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance_m(*self, *other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance between two coordinates in metres.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(45.55, -73.58);
        let b = Coordinate::new(45.53, -73.61);
        assert_abs_diff_eq!(distance_m(a, b), distance_m(b, a), epsilon = 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Coordinate::new(45.5017, -73.5673);
        assert_abs_diff_eq!(distance_m(a, a), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn hundredth_of_a_degree_latitude_is_about_1112_m() {
        let a = Coordinate::new(45.50, -73.60);
        let b = Coordinate::new(45.51, -73.60);
        assert_abs_diff_eq!(distance_m(a, b), 1112.0, epsilon = 5.0);
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let equator = distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01));
        let montreal = distance_m(Coordinate::new(45.5, 0.0), Coordinate::new(45.5, 0.01));
        assert!(montreal < equator);
    }
}
