//! One assignment pass over the session, printed as JSON or CSV.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, Timelike};
use clap::ValueEnum;
use dispatch_core::routing::{build_route_provider, plan_routes, RouteProviderKind, RoutePlan};
use dispatch_core::session::IncidentStore;
use dispatch_core::severity::ThresholdClassifier;
use dispatch_core::{AssignmentEngine, AssignmentResult, EngineConfig, HourOfDay};
use dispatch_inventory::{
    read_hydrants_from_path, read_stations_from_path, write_assignments_csv, LoadOptions,
};
use log::info;
use serde::Serialize;

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone)]
pub struct AssignArgs {
    pub hydrants: PathBuf,
    pub stations: PathBuf,
    pub hour: Option<u32>,
    pub config: Option<PathBuf>,
    pub max_hydrants: Option<usize>,
    pub format: OutputFormat,
    pub routes: bool,
    pub osrm: Option<String>,
}

#[derive(Serialize)]
struct AssignReport<'a> {
    hour_of_day: HourOfDay,
    results: &'a [AssignmentResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    routes: Option<RoutePlan>,
}

fn route_provider_kind(
    osrm: Option<&str>,
) -> Result<RouteProviderKind, Box<dyn std::error::Error>> {
    match osrm {
        None => Ok(RouteProviderKind::StraightLine),
        #[cfg(feature = "osrm")]
        Some(endpoint) => Ok(RouteProviderKind::Osrm {
            endpoint: endpoint.to_string(),
        }),
        #[cfg(not(feature = "osrm"))]
        Some(_) => Err("this build has no OSRM support; rebuild with --features osrm".into()),
    }
}

pub fn run(session: &Path, args: &AssignArgs, out: &mut dyn Write) -> CommandResult {
    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let engine = AssignmentEngine::new(config)?;
    let hour = HourOfDay::new(args.hour.unwrap_or_else(|| Local::now().hour()))?;

    let hydrant_options = LoadOptions {
        max_rows: args.max_hydrants,
    };
    let hydrants = read_hydrants_from_path(&args.hydrants, &hydrant_options)?;
    let stations = read_stations_from_path(&args.stations, &LoadOptions::default())?;
    let incidents = IncidentStore::load(session)?.incidents();

    info!(
        "assigning {} incidents against {} hydrants and {} stations at hour {}",
        incidents.len(),
        hydrants.items.len(),
        stations.items.len(),
        hour.get()
    );
    let results = engine.run(
        &incidents,
        &hydrants.items,
        &stations.items,
        &ThresholdClassifier::default(),
        hour,
    );

    let routes = if args.routes {
        let provider = build_route_provider(&route_provider_kind(args.osrm.as_deref())?)?;
        let plan = plan_routes(&results, provider.as_ref());
        info!("planned {} routes ({} failed)", plan.routes.len(), plan.failures);
        Some(plan)
    } else {
        None
    };

    match args.format {
        OutputFormat::Json => {
            let report = AssignReport {
                hour_of_day: hour,
                results: &results,
                routes,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_assignments_csv(&mut *out, &results)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HYDRANTS: &str = "ADRESSE,LATITUDE,LONGITUDE
a,45.5505,-73.58
b,45.5510,-73.58
c,45.5515,-73.58
d,45.5520,-73.58
";
    const STATIONS: &str = "CASERNE,NO_CIVIQUE,RUE,LATITUDE,LONGITUDE
16,2915,avenue du Mont-Royal Est,45.5500,-73.5772
";

    fn setup(dir: &Path) -> (PathBuf, AssignArgs) {
        let hydrants = dir.join("hydrants.csv");
        let stations = dir.join("stations.csv");
        fs::write(&hydrants, HYDRANTS).unwrap();
        fs::write(&stations, STATIONS).unwrap();

        let session = dir.join("session.json");
        let mut store = IncidentStore::new();
        store.place(dispatch_core::Coordinate::new(45.55, -73.58));
        store.save(&session).unwrap();

        let args = AssignArgs {
            hydrants,
            stations,
            hour: Some(12),
            config: None,
            max_hydrants: None,
            format: OutputFormat::Json,
            routes: false,
            osrm: None,
        };
        (session, args)
    }

    #[test]
    fn json_report_lists_station_and_hydrants() {
        let dir = tempfile::tempdir().unwrap();
        let (session, args) = setup(dir.path());
        let mut out = Vec::new();

        run(&session, &args, &mut out).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["hour_of_day"], 12);
        let result = &report["results"][0];
        assert_eq!(result["station"]["id"], "16");
        assert_eq!(result["hydrants"].as_array().map(Vec::len), Some(3));
        assert_eq!(result["severity"], "low");
        assert!(report.get("routes").is_none());
    }

    #[test]
    fn routes_are_included_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let (session, mut args) = setup(dir.path());
        args.routes = true;
        let mut out = Vec::new();

        run(&session, &args, &mut out).unwrap();

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["routes"]["routes"].as_array().map(Vec::len), Some(3));
        assert_eq!(report["routes"]["failures"], 0);
    }

    #[test]
    fn csv_output_and_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let (session, mut args) = setup(dir.path());
        let config = dir.path().join("engine.json");
        fs::write(&config, r#"{"hydrants_per_incident": 1}"#).unwrap();
        args.config = Some(config);
        args.format = OutputFormat::Csv;
        let mut out = Vec::new();

        run(&session, &args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn invalid_hour_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (session, mut args) = setup(dir.path());
        args.hour = Some(24);
        assert!(run(&session, &args, &mut Vec::new()).is_err());
    }
}
