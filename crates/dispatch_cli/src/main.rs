use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};

mod commands;

use commands::assign::{AssignArgs, OutputFormat};
use commands::incidents::IncidentsCommand;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "dispatch",
    about = "Assign fire stations and hydrants to reported incidents",
    long_about = "Keeps a session of incident locations and pairs each one with the\n\
                  nearest fire station and its closest free hydrants."
)]
struct Cli {
    /// Session file holding the incident list
    #[arg(long, global = true, env = "DISPATCH_SESSION", default_value = "session.json")]
    session: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add, place, clear or list incidents in the session
    Incidents {
        #[command(subcommand)]
        command: IncidentsCommand,
    },
    /// Run an assignment over the session's incidents
    Assign {
        /// Hydrant CSV export
        #[arg(long)]
        hydrants: PathBuf,
        /// Fire station CSV export
        #[arg(long)]
        stations: PathBuf,
        /// Hour of day fed to the severity classifier (defaults to the local clock)
        #[arg(long)]
        hour: Option<u32>,
        /// Engine configuration JSON
        #[arg(long)]
        config: Option<PathBuf>,
        /// Read at most this many hydrant rows
        #[arg(long)]
        max_hydrants: Option<usize>,
        /// Output format
        #[arg(value_enum, long, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Also plan station-to-hydrant routes
        #[arg(long)]
        routes: bool,
        /// OSRM endpoint for routes (requires the `osrm` feature)
        #[arg(long, env = "DISPATCH_OSRM")]
        osrm: Option<String>,
    },
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    let outcome = match cli.command {
        Commands::Incidents { command } => {
            commands::incidents::run(&cli.session, command, &mut stdout)
        }
        Commands::Assign {
            hydrants,
            stations,
            hour,
            config,
            max_hydrants,
            format,
            routes,
            osrm,
        } => commands::assign::run(
            &cli.session,
            &AssignArgs {
                hydrants,
                stations,
                hour,
                config,
                max_hydrants,
                format,
                routes,
                osrm,
            },
            &mut stdout,
        ),
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        exit(1);
    }
}
