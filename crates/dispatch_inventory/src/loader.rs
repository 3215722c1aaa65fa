//! Row-by-row loading with skip accounting.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use dispatch_core::{Hydrant, Station};
use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::error::InventoryError;
use crate::records::{HydrantRecord, StationRecord};

/// Loader limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Stop after this many accepted rows. Skipped rows do not count.
    pub max_rows: Option<usize>,
}

impl LoadOptions {
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Accepted items plus the number of rows that were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}

fn read_rows<R, Rec, T>(
    reader: R,
    options: &LoadOptions,
    kind: &str,
    convert: impl Fn(Rec) -> Option<T>,
) -> Result<Loaded<T>, InventoryError>
where
    R: Read,
    Rec: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut loaded: Loaded<T> = Loaded::default();

    for (index, row) in csv_reader.deserialize::<Rec>().enumerate() {
        if options.max_rows.is_some_and(|max| loaded.items.len() >= max) {
            break;
        }
        // Line 1 is the header.
        let line = index + 2;
        let record = match row {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!("skipping malformed {kind} row at line {line}: {err}");
                loaded.skipped += 1;
                continue;
            }
        };
        match convert(record) {
            Some(item) => loaded.items.push(item),
            None => {
                warn!("skipping {kind} row at line {line}: non-numeric coordinates");
                loaded.skipped += 1;
            }
        }
    }

    info!(
        "loaded {} {kind} rows ({} skipped)",
        loaded.items.len(),
        loaded.skipped
    );
    Ok(loaded)
}

pub fn read_hydrants<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<Loaded<Hydrant>, InventoryError> {
    read_rows(reader, options, "hydrant", HydrantRecord::into_hydrant)
}

pub fn read_stations<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<Loaded<Station>, InventoryError> {
    read_rows(reader, options, "station", StationRecord::into_station)
}

pub fn read_hydrants_from_path(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Loaded<Hydrant>, InventoryError> {
    read_hydrants(File::open(path)?, options)
}

pub fn read_stations_from_path(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Loaded<Station>, InventoryError> {
    read_stations(File::open(path)?, options)
}
