//! Runs the startup health checks and exits 0 (pass), 1 (fail) or 2 (warnings)

use clap::Parser;

use lap_racer::app::AppConfig;
use lap_racer::{health, init_tracing};

#[derive(Debug, Parser)]
#[command(name = "health", version, about = "Lap Racer startup health checks")]
struct Args {
    /// Print details for every check, not only failing ones
    #[arg(short, long)]
    verbose: bool,

    /// Also show the game's own log output while checks run
    #[arg(long)]
    logs: bool,
}

fn main() {
    let args = Args::parse();

    // Quiet by default so the table stays readable; RUST_LOG still applies
    let log_level = if args.logs {
        AppConfig::default().log_level
    } else {
        "warn".to_string()
    };
    init_tracing(&log_level);

    let report = health::run_all_checks();
    health::print_report(&report, args.verbose);

    std::process::exit(report.exit_code());
}
