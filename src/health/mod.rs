//! Health check system for validating application initialization and status
//!
//! Every check runs headless, so the `health` binary works in CI and over SSH
//! where no window or GPU is available.
//!
//! # Example
//!
//! ```no_run
//! use lap_racer::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(WorldCheck::new())
//!     .add_check(TrackCheck::new())
//!     .add_check(BuildInfoCheck::new())
//!     .add_check(SystemInfoCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::WorldCheck::new())
        .add_check(checks::TrackCheck::new())
        .add_check(checks::EguiContextCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .run()
}
