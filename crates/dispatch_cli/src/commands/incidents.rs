//! Session editing: the CLI stand-in for clicking on the map.

use std::io::Write;
use std::path::Path;

use clap::Subcommand;
use dispatch_core::session::IncidentStore;
use dispatch_core::Coordinate;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::CommandResult;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum IncidentsCommand {
    /// Drop random incidents inside the session's bounding box
    Add {
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Seed for reproducible placement
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Add an incident at an explicit location
    Place {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Remove every incident
    Clear,
    /// Print the incidents
    List,
}

pub fn run(session: &Path, command: IncidentsCommand, out: &mut dyn Write) -> CommandResult {
    let mut store = IncidentStore::load(session)?;

    match command {
        IncidentsCommand::Add { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            store.add_many(count, &mut rng);
            store.save(session)?;
            info!("added {count} incidents ({} total)", store.len());
        }
        IncidentsCommand::Place { lat, lon } => {
            let point = Coordinate::new(lat, lon);
            if !store.bounds().contains(point) {
                info!("placing incident outside the session box at {lat}, {lon}");
            }
            store.place(point);
            store.save(session)?;
        }
        IncidentsCommand::Clear => {
            store.clear();
            store.save(session)?;
            info!("session cleared");
        }
        IncidentsCommand::List => {
            for incident in store.incidents() {
                writeln!(
                    out,
                    "{}\t{:.6}\t{:.6}",
                    incident.id, incident.coordinate.lat, incident.coordinate.lon
                )?;
            }
        }
    }

    Ok(())
}
