//! Game world/simulation health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};
use crate::sim::World;
use crate::sim::race::RaceSimulation;

/// Checks that the world can be built around a race and ticked
pub struct WorldCheck;

impl WorldCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorldCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for WorldCheck {
    fn name(&self) -> &'static str {
        "World/Simulation"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates race construction, fixed-step ticking, pause and time scale")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let fail = |message: &str, details: &[String]| {
            CheckResult::fail(message.to_string()).with_details(details.join("\n"))
        };

        let config = AppConfig::default().race_config();
        let timestep = config.physics.timestep;
        let race = match RaceSimulation::new(config) {
            Ok(race) => race,
            Err(e) => return CheckResult::fail(format!("Race failed to build: {e}")),
        };
        let mut world = World::with_race(race);
        details.push("  ✓ World built with race".to_string());

        if world.tick_count() != 0 || world.sim_time() != 0.0 {
            details.push("  ✗ Fresh world should start at zero".to_string());
            return fail("World initialization failed", &details);
        }

        // Two and a half steps worth of time
        world.tick(timestep * 2.5);
        let steps = world.race().map_or(0, |race| race.physics().steps());
        if world.tick_count() != 1 || steps != 2 {
            details.push(format!(
                "  ✗ Expected 1 tick and 2 physics steps, got {} and {}",
                world.tick_count(),
                steps
            ));
            return fail("World tick failed", &details);
        }
        details.push(format!("  ✓ After tick: count={}, physics steps={}", world.tick_count(), steps));

        world.pause();
        world.tick(1.0);
        if world.tick_count() != 1 {
            details.push("  ✗ Paused world still ticked".to_string());
            return fail("World pause failed", &details);
        }
        details.push("  ✓ Pause state: working".to_string());

        world.resume();
        world.set_time_scale(2.0);
        if world.time_scale() != 2.0 {
            details.push("  ✗ Time scale failed".to_string());
            return fail("World time scale failed", &details);
        }
        details.push("  ✓ Time scale: working".to_string());

        world.reset_all_simulations();
        let idle = world.race().is_some_and(|race| !race.lap_timer().is_running());
        if !idle {
            details.push("  ✗ Reset left the lap timer running".to_string());
            return fail("World reset failed", &details);
        }
        details.push("  ✓ Reset returns the race to idle".to_string());

        CheckResult::pass("All world systems operational").with_details(details.join("\n"))
    }
}
