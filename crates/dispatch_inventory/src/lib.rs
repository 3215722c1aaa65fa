//! Hydrant and station inventories from the city's open-data CSV exports, and CSV
//! export of assignment results.
//!
//! The engine in `dispatch_core` never reads files; this crate turns source rows into
//! [`Hydrant`](dispatch_core::Hydrant) and [`Station`](dispatch_core::Station) values
//! and skips rows it cannot place on a map.

pub mod error;
pub mod export;
pub mod loader;
pub mod records;

pub use error::InventoryError;
pub use export::write_assignments_csv;
pub use loader::{
    read_hydrants, read_hydrants_from_path, read_stations, read_stations_from_path, LoadOptions,
    Loaded,
};
pub use records::{HydrantRecord, StationRecord};
