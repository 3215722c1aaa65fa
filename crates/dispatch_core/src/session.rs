//! Caller-owned incident session.
//!
//! The store is an ordered list of incident locations. `add` drops a random point
//! inside the store's bounding box, `place` appends an explicit point, `clear`
//! empties it. The engine only ever sees a snapshot from [`IncidentStore::incidents`].

use std::fs;
use std::path::Path;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::geo::Coordinate;
use crate::resources::Incident;

/// Default incident box: a slice of central-north Montréal (approx).
const DEFAULT_LAT_MIN: f64 = 45.53;
const DEFAULT_LAT_MAX: f64 = 45.58;
const DEFAULT_LON_MIN: f64 = -73.62;
const DEFAULT_LON_MAX: f64 = -73.55;

/// Axis-aligned lat/lon box in decimal degrees.
///
/// Bounds are checked on construction and on deserialization, so every box in
/// hand has `min <= max` on both axes and no NaN edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundingBox")]
pub struct BoundingBox {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

/// Unchecked wire shape of [`BoundingBox`].
#[derive(Deserialize)]
struct RawBoundingBox {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = DispatchError;

    fn try_from(raw: RawBoundingBox) -> Result<Self, Self::Error> {
        Self::new(raw.lat_min, raw.lat_max, raw.lon_min, raw.lon_max)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            lat_min: DEFAULT_LAT_MIN,
            lat_max: DEFAULT_LAT_MAX,
            lon_min: DEFAULT_LON_MIN,
            lon_max: DEFAULT_LON_MAX,
        }
    }
}

impl BoundingBox {
    pub fn new(
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    ) -> Result<Self, DispatchError> {
        if lat_min.is_nan() || lat_max.is_nan() || lat_min > lat_max {
            return Err(DispatchError::config(
                "bounding_box",
                "lat_min must not exceed lat_max",
            ));
        }
        if lon_min.is_nan() || lon_max.is_nan() || lon_min > lon_max {
            return Err(DispatchError::config(
                "bounding_box",
                "lon_min must not exceed lon_max",
            ));
        }
        Ok(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    pub fn lat_range(&self) -> (f64, f64) {
        (self.lat_min, self.lat_max)
    }

    pub fn lon_range(&self) -> (f64, f64) {
        (self.lon_min, self.lon_max)
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lon)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }

    /// Uniform random point inside the box. Never panics: the range is non-empty
    /// for every box that passed [`BoundingBox::new`].
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Coordinate {
        Coordinate::new(
            rng.gen_range(self.lat_min..=self.lat_max),
            rng.gen_range(self.lon_min..=self.lon_max),
        )
    }
}

/// Ordered incident locations for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentStore {
    #[serde(default)]
    bounds: BoundingBox,
    #[serde(default)]
    points: Vec<Coordinate>,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            points: Vec::new(),
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Append a random incident inside the bounding box and return its location.
    pub fn add<R: Rng>(&mut self, rng: &mut R) -> Coordinate {
        let point = self.bounds.sample(rng);
        self.points.push(point);
        point
    }

    pub fn add_many<R: Rng>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count {
            self.add(rng);
        }
    }

    /// Append an incident at an explicit location. Points outside the bounding
    /// box are accepted.
    pub fn place(&mut self, point: Coordinate) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Snapshot for an assignment run. Ids are positions in the session.
    pub fn incidents(&self) -> Vec<Incident> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, point)| Incident::new(i, *point))
            .collect()
    }

    /// Read a session file. A missing file is an empty session.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DispatchError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no session at {}; starting empty", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DispatchError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
