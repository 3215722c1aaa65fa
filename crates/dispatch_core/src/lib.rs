//! Incident-resource assignment: pairs reported incidents with the nearest fire
//! station and an exclusive set of nearby hydrants, then grades each incident's
//! severity through an injected classifier.
//!
//! The engine is pure and call-local. Everything with I/O (routing, session files)
//! sits behind the traits and types in [`routing`] and [`session`].

pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod pairing;
pub mod pool;
pub mod resources;
pub mod routing;
pub mod search;
pub mod session;
pub mod severity;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use config::{EngineConfig, HourOfDay};
pub use engine::{AssignmentEngine, AssignmentResult};
pub use error::DispatchError;
pub use geo::{distance_m, Coordinate};
pub use resources::{Hydrant, HydrantId, Incident, IncidentId, Station, StationId};
pub use severity::{Severity, SeverityClassifier};
