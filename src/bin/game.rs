use anyhow::Context;
use tracing::{info, warn};
use winit::event_loop::{ControlFlow, EventLoop};

use lap_racer::app::{App, AppConfig};
use lap_racer::{build_info, init_tracing};

fn main() -> anyhow::Result<()> {
    // Config picks the log filter, so a load failure is reported once tracing is up
    let (config, load_error) = match AppConfig::load_from_env() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_tracing(&config.log_level);
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using default configuration");
    }
    info!(version = %build_info::version_string(), "Lap Racer");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config).context("failed to build the race")?;

    event_loop
        .run_app(&mut app)
        .context("event loop terminated with an error")?;

    Ok(())
}
