use std::cell::RefCell;

use dispatch_core::severity::SeverityFeatures;
use dispatch_core::test_helpers::{hydrant_ladder, station_pair, test_point};
use dispatch_core::{Coordinate, HourOfDay, Hydrant, Severity, SeverityClassifier, Station};

/// Seeded geography so every test reuses the same incident point.
pub fn seeded_point() -> Coordinate {
    test_point()
}

pub fn seeded_hydrants(n: usize) -> Vec<Hydrant> {
    hydrant_ladder(test_point(), n)
}

pub fn seeded_stations() -> Vec<Station> {
    station_pair()
}

pub fn noon() -> HourOfDay {
    HourOfDay::new(12).expect("valid hour")
}

/// Records every feature vector it is asked to grade and answers `answer`.
pub struct RecordingClassifier {
    pub answer: Severity,
    pub seen: RefCell<Vec<SeverityFeatures>>,
}

impl RecordingClassifier {
    pub fn new(answer: Severity) -> Self {
        Self {
            answer,
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl SeverityClassifier for RecordingClassifier {
    fn predict(&self, lat: f64, lon: f64, distance_to_station_m: f64, hour_of_day: u8) -> Severity {
        self.seen.borrow_mut().push(SeverityFeatures {
            lat,
            lon,
            distance_to_station_m,
            hour_of_day,
        });
        self.answer
    }
}
