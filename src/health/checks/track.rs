//! Track and physics health check

use std::time::Duration;

use crate::health::check::{CheckResult, SystemCheck};
use crate::sim::clock::ManualClock;
use crate::sim::physics::VehiclePose;
use crate::sim::race::{RaceConfig, RaceSimulation};
use crate::sim::track::TrackLayout;

const EXPECTED_WALLS: usize = 11;

/// Drives a scripted lap to prove contacts reach the lap timer
pub struct TrackCheck;

impl TrackCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrackCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for TrackCheck {
    fn name(&self) -> &'static str {
        "Track/Physics"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates track layout, goal and wall contacts, and lap recording")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let track = TrackLayout::workshop();
        if track.walls.len() != EXPECTED_WALLS {
            return CheckResult::fail(format!(
                "Track has {} walls, expected {}",
                track.walls.len(),
                EXPECTED_WALLS
            ));
        }
        details.push(format!("  ✓ Track: {} walls, goal at {:?}", track.walls.len(), track.goal.center));

        let clock = ManualClock::new();
        let mut race = match RaceSimulation::with_clock(RaceConfig::default(), track, clock.clone()) {
            Ok(race) => race,
            Err(e) => return CheckResult::fail(format!("Physics world failed to build: {e}")),
        };
        details.push(format!(
            "  ✓ Physics: {} bodies, {} colliders",
            race.physics().body_count(),
            race.physics().collider_count()
        ));

        // Spawned on the goal; moving off it starts the lap
        race.step();
        race.physics_mut().teleport_vehicle(VehiclePose {
            position: [10.0, 35.0],
            angle: 0.0,
        });
        race.step();
        if !race.lap_timer().is_running() {
            return CheckResult::fail("Leaving the goal did not start the lap timer")
                .with_details(details.join("\n"));
        }
        details.push("  ✓ Goal exit starts the lap".to_string());

        clock.advance(Duration::from_millis(2_000));
        race.physics_mut().teleport_vehicle(VehiclePose {
            position: [-10.0, -0.2],
            angle: 0.0,
        });
        race.step();
        if race.lap_timer().current_penalties() != Some(1) {
            return CheckResult::fail("Wall contact did not add a penalty")
                .with_details(details.join("\n"));
        }
        details.push("  ✓ Wall contact adds a penalty".to_string());

        clock.advance(Duration::from_millis(8_000));
        race.physics_mut().reset_vehicle();
        race.step();
        race.physics_mut().teleport_vehicle(VehiclePose {
            position: [10.0, 35.0],
            angle: 0.0,
        });
        race.step();

        match race.lap_timer().best_laps().first() {
            Some(lap) if lap.lap_time_ms == 10_000 && lap.penalties == 1 => {
                details.push(format!("  ✓ Lap recorded: {}ms, score {}", lap.lap_time_ms, lap.score()));
                CheckResult::pass("Scripted lap recorded").with_details(details.join("\n"))
            }
            Some(lap) => CheckResult::fail(format!(
                "Unexpected lap: {}ms with {} penalties",
                lap.lap_time_ms, lap.penalties
            ))
            .with_details(details.join("\n")),
            None => CheckResult::fail("No lap recorded").with_details(details.join("\n")),
        }
    }
}
