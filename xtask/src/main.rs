use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the incident dispatch workspace",
    long_about = "A unified CLI for running the assignment demo, benchmarks,\n\
                  load tests, and CI checks in the incident dispatch workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the assignment demo (10 incidents on random inventory)
    Run,
    /// Run an assignment with the dispatch CLI against CSV exports
    Assign {
        /// Hydrant CSV export
        #[arg(long, env = "DISPATCH_HYDRANTS")]
        hydrants: String,
        /// Fire station CSV export
        #[arg(long, env = "DISPATCH_STATIONS")]
        stations: String,
        /// Number of random incidents to drop first
        #[arg(long, default_value_t = 10)]
        incidents: usize,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in dispatch_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the demo
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn git(args: &[&str]) -> ExitStatus {
    eprintln!("+ git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .status()
        .expect("failed to execute git")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_git(args: &[&str]) {
    let status = git(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_dispatch(args: &[&str]) {
    let mut full = vec!["run", "-p", "dispatch_cli", "--bin", "dispatch", "--"];
    full.extend_from_slice(args);
    run_cargo(&full);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test dispatch_core");
    run_cargo(&["test", "-p", "dispatch_core"]);

    step("Test dispatch_core (osrm)");
    run_cargo(&["test", "-p", "dispatch_core", "--features", "osrm"]);

    step("Test dispatch_inventory");
    run_cargo(&["test", "-p", "dispatch_inventory"]);

    step("Test dispatch_cli");
    run_cargo(&["test", "-p", "dispatch_cli"]);
}

fn ci_examples() {
    step("Run assignment_run (10 incidents, 900 hydrants)");
    run_cargo(&[
        "run",
        "-p",
        "dispatch_core",
        "--example",
        "assignment_run",
        "--release",
    ]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "dispatch_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_cargo(&[
                "run",
                "-p",
                "dispatch_core",
                "--example",
                "assignment_run",
                "--release",
            ]);
        }
        Commands::Assign {
            hydrants,
            stations,
            incidents,
        } => {
            let session = "target/xtask-session.json";
            let count = incidents.to_string();

            step("Reset session");
            run_dispatch(&["--session", session, "incidents", "clear"]);
            run_dispatch(&["--session", session, "incidents", "add", "--count", &count]);

            step("Assign");
            run_dispatch(&[
                "--session",
                session,
                "assign",
                "--hydrants",
                &hydrants,
                "--stations",
                &stations,
                "--routes",
            ]);
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "dispatch_core", "--bench", "performance"]);
        }
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                std::fs::remove_dir_all(baseline_dir).expect("failed to remove target/criterion");
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_cargo(&[
                "bench",
                "--package",
                "dispatch_core",
                "--bench",
                "performance",
                "--",
                "--save-baseline",
                "main",
            ]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_cargo(&[
                "bench",
                "--package",
                "dispatch_core",
                "--bench",
                "performance",
                "--",
                "--baseline",
                "main",
            ]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "dispatch_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
