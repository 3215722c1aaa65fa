//! Nearest-resource search.
//!
//! Two policies:
//!
//! - **Stations**: single closest, no exclusivity. Linear scan with a strict `<`, so the
//!   first station in input order wins an exact tie.
//! - **Hydrants**: the `k` closest whose ids are not yet claimed, nearest first. The sort
//!   is stable, so equidistant hydrants keep their input order.

use std::collections::HashSet;

use crate::geo::{distance_m, Coordinate};
use crate::resources::{Hydrant, HydrantId, Station};

/// Closest station to `point`, or `None` when `stations` is empty.
pub fn nearest_station(point: Coordinate, stations: &[Station]) -> Option<&Station> {
    let mut best: Option<(&Station, f64)> = None;

    for station in stations {
        let dist = distance_m(point, station.coordinate);
        match best {
            None => best = Some((station, dist)),
            Some((_, best_dist)) if dist < best_dist => best = Some((station, dist)),
            _ => {}
        }
    }

    best.map(|(station, _)| station)
}

/// Up to `k` unclaimed hydrants ordered by ascending distance from `point`.
///
/// Returns fewer than `k` when the pool runs short; never pads. Inventory rows that
/// share an id are one hydrant, so at most one of them is returned.
pub fn nearest_unclaimed_hydrants<'a, I>(
    point: Coordinate,
    hydrants: I,
    claimed: &HashSet<HydrantId>,
    k: usize,
) -> Vec<&'a Hydrant>
where
    I: IntoIterator<Item = &'a Hydrant>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(f64, &'a Hydrant)> = hydrants
        .into_iter()
        .filter(|hydrant| !claimed.contains(&hydrant.id))
        .map(|hydrant| (distance_m(point, hydrant.coordinate), hydrant))
        .collect();

    candidates.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    let mut picked_ids = HashSet::with_capacity(k);
    candidates
        .into_iter()
        .filter(|(_, hydrant)| picked_ids.insert(hydrant.id))
        .take(k)
        .map(|(_, hydrant)| hydrant)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinate {
        Coordinate::new(45.55, -73.58)
    }

    #[test]
    fn selects_closer_station_regardless_of_order() {
        let stations = vec![
            Station::new("far", "Far", Coordinate::new(45.60, -73.58)),
            Station::new("near", "Near", Coordinate::new(45.551, -73.58)),
        ];
        let found = nearest_station(origin(), &stations).expect("station");
        assert_eq!(found.id.0, "near");
    }

    #[test]
    fn station_tie_keeps_first_seen() {
        let shared = Coordinate::new(45.552, -73.581);
        let stations = vec![
            Station::new("first", "First", shared),
            Station::new("second", "Second", shared),
        ];
        let found = nearest_station(origin(), &stations).expect("station");
        assert_eq!(found.id.0, "first");
    }

    #[test]
    fn no_stations_yields_none() {
        assert!(nearest_station(origin(), &[]).is_none());
    }

    #[test]
    fn hydrants_come_back_nearest_first() {
        let hydrants = vec![
            Hydrant::new("third", Coordinate::new(45.553, -73.58)),
            Hydrant::new("first", Coordinate::new(45.551, -73.58)),
            Hydrant::new("fourth", Coordinate::new(45.554, -73.58)),
            Hydrant::new("second", Coordinate::new(45.552, -73.58)),
        ];
        let picked = nearest_unclaimed_hydrants(origin(), &hydrants, &HashSet::new(), 3);
        let names: Vec<&str> = picked.iter().map(|h| h.address.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn claimed_hydrants_are_skipped() {
        let hydrants = vec![
            Hydrant::new("first", Coordinate::new(45.551, -73.58)),
            Hydrant::new("second", Coordinate::new(45.552, -73.58)),
        ];
        let claimed: HashSet<HydrantId> = [hydrants[0].id].into_iter().collect();
        let picked = nearest_unclaimed_hydrants(origin(), &hydrants, &claimed, 3);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].address, "second");
    }

    #[test]
    fn shared_coordinate_is_one_hydrant_and_first_row_wins() {
        let shared = Coordinate::new(45.552, -73.581);
        let hydrants = vec![
            Hydrant::new("east", shared),
            Hydrant::new("west", shared),
            Hydrant::new("beyond", Coordinate::new(45.56, -73.58)),
        ];
        let picked = nearest_unclaimed_hydrants(origin(), &hydrants, &HashSet::new(), 2);
        let names: Vec<&str> = picked.iter().map(|h| h.address.as_str()).collect();
        assert_eq!(names, vec!["east", "beyond"]);
    }

    #[test]
    fn zero_k_returns_nothing() {
        let hydrants = vec![Hydrant::new("only", Coordinate::new(45.551, -73.58))];
        assert!(nearest_unclaimed_hydrants(origin(), &hydrants, &HashSet::new(), 0).is_empty());
    }
}
