//! Assignment results as CSV, one row per (incident, hydrant rank).

use std::io::Write;

use dispatch_core::AssignmentResult;

use crate::error::InventoryError;

const HEADER: [&str; 10] = [
    "incident_id",
    "severity",
    "station_id",
    "station_name",
    "distance_to_station_m",
    "hydrant_rank",
    "hydrant_id",
    "hydrant_address",
    "hydrant_lat",
    "hydrant_lon",
];

/// Write `results` to `writer`. An incident with no hydrants still gets one row with
/// the hydrant columns left empty. Incident ids are written as plain ordinals.
pub fn write_assignments_csv<W: Write>(
    writer: W,
    results: &[AssignmentResult],
) -> Result<(), InventoryError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for result in results {
        let incident_id = result.incident_id.0.to_string();
        let severity = result.severity.as_str();
        let (station_id, station_name) = result
            .station
            .as_ref()
            .map(|s| (s.id.0.as_str(), s.name.as_str()))
            .unwrap_or(("", ""));
        let station_distance = if result.station.is_some() {
            format!("{:.1}", result.distance_to_station_m)
        } else {
            String::new()
        };

        if result.hydrants.is_empty() {
            wtr.write_record([
                incident_id.as_str(),
                severity,
                station_id,
                station_name,
                station_distance.as_str(),
                "",
                "",
                "",
                "",
                "",
            ])?;
            continue;
        }

        for (rank, hydrant) in result.hydrants.iter().enumerate() {
            wtr.write_record([
                incident_id.clone(),
                severity.to_string(),
                station_id.to_string(),
                station_name.to_string(),
                station_distance.clone(),
                (rank + 1).to_string(),
                hydrant.id.to_string(),
                hydrant.address.clone(),
                hydrant.coordinate.lat.to_string(),
                hydrant.coordinate.lon.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
