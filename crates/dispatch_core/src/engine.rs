//! Assignment engine: chunks incidents, shares one station per chunk, hands out
//! exclusive hydrants, and grades severity.

use log::debug;
use serde::Serialize;

use crate::config::{EngineConfig, HourOfDay};
use crate::error::DispatchError;
use crate::geo::distance_m;
use crate::pairing::PairingScheduler;
use crate::pool::ResourcePool;
use crate::resources::{Hydrant, Incident, IncidentId, Station};
use crate::search::{nearest_station, nearest_unclaimed_hydrants};
use crate::severity::{Severity, SeverityClassifier, SeverityFeatures};

/// What one incident received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentResult {
    pub incident_id: IncidentId,
    pub station: Option<Station>,
    /// Nearest first; at most `hydrants_per_incident`.
    pub hydrants: Vec<Hydrant>,
    pub severity: Severity,
    /// Metres from the incident to `station`; 0 when there is none.
    pub distance_to_station_m: f64,
}

/// Stateless assignment engine. Every [`run`](Self::run) starts from a fresh pool.
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    config: EngineConfig,
    scheduler: PairingScheduler,
}

impl AssignmentEngine {
    pub fn new(config: EngineConfig) -> Result<Self, DispatchError> {
        config.validate()?;
        let scheduler = config.scheduler()?;
        Ok(Self { config, scheduler })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            scheduler: PairingScheduler::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assign a station and exclusive hydrants to every incident, in input order.
    ///
    /// Stations are picked once per chunk from the chunk's first incident and may
    /// serve any number of incidents. Hydrants are never given to two incidents in
    /// the same run. Nothing carries over between runs.
    ///
    /// # Panics
    ///
    /// Panics if a hydrant id would be handed out twice in one run. That means the
    /// search and the pool disagree about what is claimed, which is a bug.
    pub fn run(
        &self,
        incidents: &[Incident],
        hydrants: &[Hydrant],
        stations: &[Station],
        classifier: &dyn SeverityClassifier,
        now: HourOfDay,
    ) -> Vec<AssignmentResult> {
        let mut pool = ResourcePool::new(hydrants);
        let mut results = Vec::with_capacity(incidents.len());

        for chunk in self.scheduler.chunk(incidents) {
            let station = nearest_station(chunk.leader().coordinate, stations);
            debug!(
                "chunk {} ({} incidents) -> station {}",
                chunk.index,
                chunk.incidents.len(),
                station.map_or("<none>", |s| s.id.0.as_str())
            );

            for incident in chunk.incidents {
                let picked = nearest_unclaimed_hydrants(
                    incident.coordinate,
                    pool.available(),
                    pool.claimed(),
                    self.config.hydrants_per_incident,
                );
                for hydrant in &picked {
                    assert!(
                        pool.claim(hydrant),
                        "hydrant {} assigned twice in one run (incident {})",
                        hydrant.id,
                        incident.id
                    );
                }

                let distance_to_station_m = station
                    .map(|s| distance_m(incident.coordinate, s.coordinate))
                    .unwrap_or(0.0);
                let severity = classifier.predict_features(&SeverityFeatures {
                    lat: incident.coordinate.lat,
                    lon: incident.coordinate.lon,
                    distance_to_station_m,
                    hour_of_day: now.get(),
                });

                debug!(
                    "incident {}: {} hydrants, {:.0} m to station, severity {}",
                    incident.id,
                    picked.len(),
                    distance_to_station_m,
                    severity
                );

                results.push(AssignmentResult {
                    incident_id: incident.id,
                    station: station.cloned(),
                    hydrants: picked.into_iter().cloned().collect(),
                    severity,
                    distance_to_station_m,
                });
            }
        }

        results
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
