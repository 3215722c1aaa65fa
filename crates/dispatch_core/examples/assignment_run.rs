//! Drop 10 random incidents on central Montréal and print what each one receives.
//!
//! Run with: cargo run -p dispatch_core --example assignment_run

use dispatch_core::routing::{plan_routes, StraightLineRouteProvider};
use dispatch_core::session::{BoundingBox, IncidentStore};
use dispatch_core::severity::ThresholdClassifier;
use dispatch_core::test_helpers::{random_hydrants, random_stations};
use dispatch_core::{AssignmentEngine, HourOfDay};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    const NUM_INCIDENTS: usize = 10;
    const NUM_HYDRANTS: usize = 900;
    const NUM_STATIONS: usize = 30;
    const SEED: u64 = 123;

    let bounds = BoundingBox::default();
    let hydrants = random_hydrants(&bounds, NUM_HYDRANTS, SEED);
    let stations = random_stations(&bounds, NUM_STATIONS, SEED + 1);

    let mut store = IncidentStore::with_bounds(bounds);
    store.add_many(NUM_INCIDENTS, &mut StdRng::seed_from_u64(SEED + 2));

    let hour = HourOfDay::new(17).expect("valid hour");
    let engine = AssignmentEngine::with_defaults();
    let results = engine.run(
        &store.incidents(),
        &hydrants,
        &stations,
        &ThresholdClassifier::default(),
        hour,
    );

    println!(
        "--- Assignment run ({} incidents, {} hydrants, {} stations, seed {}) ---",
        NUM_INCIDENTS, NUM_HYDRANTS, NUM_STATIONS, SEED
    );
    for result in &results {
        let station = result
            .station
            .as_ref()
            .map_or_else(|| "-".to_string(), |s| s.name.clone());
        let hydrants: Vec<String> = result.hydrants.iter().map(|h| h.id.to_string()).collect();
        println!(
            "  {}  station={}  {:.0} m  severity={}  hydrants=[{}]",
            result.incident_id,
            station,
            result.distance_to_station_m,
            result.severity,
            hydrants.join(" ")
        );
    }

    let plan = plan_routes(&results, &StraightLineRouteProvider);
    let total_m: f64 = plan.routes.iter().map(|r| r.route.distance_m).sum();
    println!(
        "\nRoutes: {} drawn, {} failed, {:.1} km total",
        plan.routes.len(),
        plan.failures,
        total_m / 1000.0
    );
}
