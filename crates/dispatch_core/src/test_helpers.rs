//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures so unit tests, integration tests and benches reuse the same
//! geography around a single incident point in Montréal.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo::Coordinate;
use crate::resources::{Hydrant, Incident, Station};
use crate::session::BoundingBox;

/// A standard incident location used across test files for consistency.
pub const TEST_INCIDENT: (f64, f64) = (45.55, -73.58);

/// Latitude step between consecutive ladder hydrants (~55 m).
pub const LADDER_STEP_DEG: f64 = 0.0005;

/// The test incident location as a `Coordinate`.
pub fn test_point() -> Coordinate {
    TEST_INCIDENT.into()
}

/// A single incident at [`test_point`].
pub fn test_incident() -> Incident {
    Incident::new(0, test_point())
}

/// `n` incidents stacked at [`test_point`] so every one competes for the same hydrants.
pub fn stacked_incidents(n: usize) -> Vec<Incident> {
    (0..n).map(|i| Incident::new(i, test_point())).collect()
}

/// `n` hydrants due north of `origin`, each one ladder step farther than the last.
///
/// Addresses are `"h0"`, `"h1"`, ... in ascending distance.
pub fn hydrant_ladder(origin: Coordinate, n: usize) -> Vec<Hydrant> {
    (0..n)
        .map(|i| {
            Hydrant::new(
                format!("h{i}"),
                Coordinate::new(origin.lat + (i + 1) as f64 * LADDER_STEP_DEG, origin.lon),
            )
        })
        .collect()
}

/// Two stations around [`test_point`]: `"near"` (~220 m east) listed after
/// `"far"` (~2.2 km west), so input order cannot pick the winner.
pub fn station_pair() -> Vec<Station> {
    let origin = test_point();
    vec![
        Station::new("far", "Caserne far", Coordinate::new(origin.lat, origin.lon - 0.028)),
        Station::new("near", "Caserne near", Coordinate::new(origin.lat, origin.lon + 0.0028)),
    ]
}

/// Seeded random inventory inside `bounds`.
pub fn random_hydrants(bounds: &BoundingBox, n: usize, seed: u64) -> Vec<Hydrant> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| Hydrant::new(format!("rand-{i}"), bounds.sample(&mut rng)))
        .collect()
}

/// Seeded random stations inside `bounds`.
pub fn random_stations(bounds: &BoundingBox, n: usize, seed: u64) -> Vec<Station> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let id = format!("{}", rng.gen_range(1..=99));
            Station::new(format!("{id}-{i}"), format!("Caserne {id}"), bounds.sample(&mut rng))
        })
        .collect()
}

/// Seeded random incidents inside `bounds`.
pub fn random_incidents(bounds: &BoundingBox, n: usize, seed: u64) -> Vec<Incident> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|i| Incident::new(i, bounds.sample(&mut rng))).collect()
}
