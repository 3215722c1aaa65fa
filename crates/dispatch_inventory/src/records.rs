//! Source row shapes.
//!
//! Headers follow the Montréal open-data exports. Every column is read as text so a
//! bad coordinate only costs its own row.

use dispatch_core::{Coordinate, Hydrant, Station};
use serde::Deserialize;

/// Attribute keys copied from a hydrant row.
pub mod hydrant_attr {
    pub const JURISDICTION: &str = "jurisdiction";
    pub const OWNER: &str = "owner";
    pub const INSTALLATION_DATE: &str = "installation_date";
    pub const STATUS: &str = "status";
    pub const ABANDONED: &str = "abandoned";
    pub const ELEVATION: &str = "elevation";
}

/// Attribute keys copied from a station row.
pub mod station_attr {
    pub const ADDRESS: &str = "address";
    pub const CITY: &str = "city";
    pub const ARRONDISSEMENT: &str = "arrondissement";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
}

/// One row of the hydrant export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HydrantRecord {
    // Excel-saved exports keep a BOM glued to the first header.
    #[serde(rename = "ADRESSE", alias = "\u{feff}ADRESSE")]
    pub address: String,
    #[serde(rename = "JURIDICTION")]
    pub jurisdiction: String,
    #[serde(rename = "PROPRIETAIRE")]
    pub owner: String,
    #[serde(rename = "DATE_INSTALLATION")]
    pub installation_date: String,
    #[serde(rename = "STATUT_ACTIF")]
    pub status: String,
    #[serde(rename = "ABANDONNE_R")]
    pub abandoned: String,
    #[serde(rename = "ELEVATION_TERRAIN")]
    pub elevation: String,
    #[serde(rename = "LATITUDE")]
    pub latitude: String,
    #[serde(rename = "LONGITUDE")]
    pub longitude: String,
}

/// One row of the fire station export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StationRecord {
    #[serde(rename = "CASERNE", alias = "\u{feff}CASERNE")]
    pub station: String,
    #[serde(rename = "NO_CIVIQUE")]
    pub civic_number: String,
    #[serde(rename = "RUE")]
    pub street: String,
    #[serde(rename = "VILLE")]
    pub city: String,
    #[serde(rename = "ARRONDISSEMENT")]
    pub arrondissement: String,
    #[serde(rename = "DATE_DEBUT")]
    pub start_date: String,
    #[serde(rename = "DATE_FIN")]
    pub end_date: String,
    #[serde(rename = "LATITUDE")]
    pub latitude: String,
    #[serde(rename = "LONGITUDE")]
    pub longitude: String,
}

fn parse_coordinate(latitude: &str, longitude: &str) -> Option<Coordinate> {
    let lat = latitude.trim().parse::<f64>().ok()?;
    let lon = longitude.trim().parse::<f64>().ok()?;
    (lat.is_finite() && lon.is_finite()).then(|| Coordinate::new(lat, lon))
}

impl HydrantRecord {
    pub fn coordinate(&self) -> Option<Coordinate> {
        parse_coordinate(&self.latitude, &self.longitude)
    }

    /// `None` when the row has no usable coordinate.
    pub fn into_hydrant(self) -> Option<Hydrant> {
        let coordinate = self.coordinate()?;
        Some(
            Hydrant::new(self.address, coordinate)
                .with_attribute(hydrant_attr::JURISDICTION, self.jurisdiction)
                .with_attribute(hydrant_attr::OWNER, self.owner)
                .with_attribute(hydrant_attr::INSTALLATION_DATE, self.installation_date)
                .with_attribute(hydrant_attr::STATUS, self.status)
                .with_attribute(hydrant_attr::ABANDONED, self.abandoned)
                .with_attribute(hydrant_attr::ELEVATION, self.elevation),
        )
    }
}

impl StationRecord {
    pub fn coordinate(&self) -> Option<Coordinate> {
        parse_coordinate(&self.latitude, &self.longitude)
    }

    pub fn address(&self) -> String {
        format!("{} {}", self.civic_number, self.street)
    }

    /// `None` when the row has no usable coordinate. The station number is both id
    /// and display name.
    pub fn into_station(self) -> Option<Station> {
        let coordinate = self.coordinate()?;
        let address = self.address();
        Some(
            Station::new(self.station.clone(), self.station, coordinate)
                .with_attribute(station_attr::ADDRESS, address)
                .with_attribute(station_attr::CITY, self.city)
                .with_attribute(station_attr::ARRONDISSEMENT, self.arrondissement)
                .with_attribute(station_attr::START_DATE, self.start_date)
                .with_attribute(station_attr::END_DATE, self.end_date),
        )
    }
}
