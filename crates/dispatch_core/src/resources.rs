//! Resource and incident records handed to the engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Decimal places kept when deriving a hydrant id from its coordinate.
pub const HYDRANT_ID_PRECISION: i32 = 7;

/// Hydrant identity, derived from the hydrant's coordinate.
///
/// Two hydrants at the same rounded coordinate share an id and are treated as one
/// resource by the exclusivity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HydrantId {
    lat_e7: i64,
    lon_e7: i64,
}

impl HydrantId {
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        let scale = 10f64.powi(HYDRANT_ID_PRECISION);
        Self {
            lat_e7: (coordinate.lat * scale).round() as i64,
            lon_e7: (coordinate.lon * scale).round() as i64,
        }
    }
}

impl fmt::Display for HydrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10f64.powi(HYDRANT_ID_PRECISION);
        write!(
            f,
            "{:.7},{:.7}",
            self.lat_e7 as f64 / scale,
            self.lon_e7 as f64 / scale
        )
    }
}

/// A fire hydrant from the municipal inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hydrant {
    pub id: HydrantId,
    pub address: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Hydrant {
    pub fn new(address: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: HydrantId::from_coordinate(coordinate),
            address: address.into(),
            coordinate,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Station identifier as published by the source (the station number).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub String);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fire station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: StationId(id.into()),
            name: name.into(),
            coordinate,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Ordinal position of an incident within its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(pub usize);

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A reported incident location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub coordinate: Coordinate,
}

impl Incident {
    pub fn new(id: usize, coordinate: Coordinate) -> Self {
        Self {
            id: IncidentId(id),
            coordinate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydrant_id_collapses_identical_coordinates() {
        let a = Hydrant::new("1 rue A", Coordinate::new(45.5512345, -73.5812345));
        let b = Hydrant::new("2 rue B", Coordinate::new(45.5512345, -73.5812345));
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn hydrant_id_distinguishes_seventh_decimal() {
        let a = HydrantId::from_coordinate(Coordinate::new(45.5512345, -73.58));
        let b = HydrantId::from_coordinate(Coordinate::new(45.5512346, -73.58));
        assert_ne!(a, b);
    }

    #[test]
    fn hydrant_id_displays_rounded_coordinate() {
        let id = HydrantId::from_coordinate(Coordinate::new(45.55, -73.58));
        assert_eq!(id.to_string(), "45.5500000,-73.5800000");
    }
}
