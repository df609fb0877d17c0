//! Lap Racer
//!
//! A top-down time-trial racer built with winit, wgpu, egui and rapier2d.

/// Game application - windowing, rendering, and input handling
pub mod app;

/// Build-time information (git SHA, branch, timestamp, etc.)
pub mod build_info;

/// Startup health checks
pub mod health;

/// Game simulation - track, vehicle physics and lap timing
pub mod sim;

/// Installs the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter`, which normally comes from the
/// config's `log_level`.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
