//! Engine configuration with sane defaults.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;
use crate::pairing::{PairingScheduler, DEFAULT_CHUNK_SIZE};

/// Hydrants handed to each incident unless configured otherwise.
pub const DEFAULT_HYDRANTS_PER_INCIDENT: usize = 3;

/// Tunables for an assignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Consecutive incidents sharing one station. Must be at least 1.
    pub chunk_size: usize,
    /// Upper bound on hydrants per incident (`k`).
    pub hydrants_per_incident: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            hydrants_per_incident: DEFAULT_HYDRANTS_PER_INCIDENT,
        }
    }
}

impl EngineConfig {
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn with_hydrants_per_incident(mut self, k: usize) -> Self {
        self.hydrants_per_incident = k;
        self
    }

    pub fn validate(&self) -> Result<(), DispatchError> {
        if self.chunk_size == 0 {
            return Err(DispatchError::config("chunk_size", "must be at least 1"));
        }
        Ok(())
    }

    /// Scheduler for this config's chunk size.
    pub fn scheduler(&self) -> Result<PairingScheduler, DispatchError> {
        NonZeroUsize::new(self.chunk_size)
            .map(PairingScheduler::new)
            .ok_or_else(|| DispatchError::config("chunk_size", "must be at least 1"))
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, DispatchError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DispatchError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Hour of the local day, 0..=23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct HourOfDay(u8);

impl HourOfDay {
    pub fn new(hour: u32) -> Result<Self, DispatchError> {
        if hour > 23 {
            return Err(DispatchError::InvalidHour(hour));
        }
        Ok(Self(hour as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for HourOfDay {
    type Error = DispatchError;

    fn try_from(hour: u32) -> Result<Self, Self::Error> {
        Self::new(hour)
    }
}

impl From<HourOfDay> for u32 {
    fn from(hour: HourOfDay) -> Self {
        hour.0 as u32
    }
}
