//! The racing game: one vehicle, one track, one lap timer

use std::any::Any;
use std::time::Duration;

use tracing::{debug, info};

use super::clock::{Clock, SimClock};
use super::contact::{BodyKind, ContactEvent};
use super::lap_timer::{LapTimer, LapTimerConfig};
use super::physics::{PhysicsConfig, PhysicsWorld};
use super::track::TrackLayout;
use super::vehicle::{ControlOutput, ControlState, GamepadSnapshot, VehicleConfig, control_output};
use super::{SimError, Simulation};

/// Everything needed to build a race
#[derive(Debug, Clone, Default)]
pub struct RaceConfig {
    pub physics: PhysicsConfig,
    pub vehicle: VehicleConfig,
    pub lap_timer: LapTimerConfig,
}

/// Race simulation driving physics at a fixed rate
pub struct RaceSimulation<C: Clock = SimClock> {
    config: RaceConfig,
    /// Advanced once per physics step when the race owns its clock
    step_clock: Option<SimClock>,
    track: TrackLayout,
    physics: PhysicsWorld,
    lap_timer: LapTimer<C>,
    actions: ControlState,
    gamepad: Option<GamepadSnapshot>,
    step_accumulator: f32,
}

impl RaceSimulation<SimClock> {
    /// Race timed in simulated time, so pausing the world pauses the lap
    pub fn new(config: RaceConfig) -> Result<Self, SimError> {
        let clock = SimClock::new();
        let mut race = Self::with_clock(config, TrackLayout::workshop(), clock.clone())?;
        race.step_clock = Some(clock);
        Ok(race)
    }
}

impl<C: Clock> RaceSimulation<C> {
    pub fn with_clock(config: RaceConfig, track: TrackLayout, clock: C) -> Result<Self, SimError> {
        let physics = PhysicsWorld::new(&track, &config.vehicle, &config.physics)?;
        let lap_timer = LapTimer::with_clock(&config.lap_timer, clock);

        Ok(Self {
            config,
            step_clock: None,
            track,
            physics,
            lap_timer,
            actions: ControlState::default(),
            gamepad: None,
            step_accumulator: 0.0,
        })
    }

    /// Latest player input, applied on every following physics step
    pub fn set_controls(&mut self, actions: ControlState, gamepad: Option<GamepadSnapshot>) {
        self.actions = actions;
        self.gamepad = gamepad;
    }

    /// Forces the current input maps to
    pub fn controls(&self) -> ControlOutput {
        control_output(&self.config.vehicle, &self.actions, self.gamepad)
    }

    /// Runs exactly one physics step and everything that hangs off it
    pub fn step(&mut self) {
        if let Some(clock) = &self.step_clock {
            clock.advance(Duration::from_secs_f32(self.physics.timestep()));
        }

        let controls = self.controls();
        self.physics.apply_controls(&controls);
        self.physics.step();

        for event in self.physics.drain_contacts() {
            self.route_contact(event);
        }

        if controls.reset {
            self.restart();
        }
    }

    /// Vehicle back to the grid and timer idle; the leaderboard survives
    pub fn restart(&mut self) {
        self.physics.reset_vehicle();
        self.lap_timer.reset();
        self.step_accumulator = 0.0;
        info!("Race restarted");
    }

    fn route_contact(&mut self, event: ContactEvent) {
        if event.is_between(BodyKind::Vehicle, BodyKind::Goal) {
            self.lap_timer.on_goal_contact_changed(event.touching);
        } else if event.is_between(BodyKind::Vehicle, BodyKind::Wall) {
            self.lap_timer.on_wall_contact_changed(event.touching);
        } else {
            debug!(?event, "Unrouted contact");
        }
    }

    pub fn lap_timer(&self) -> &LapTimer<C> {
        &self.lap_timer
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    pub fn track(&self) -> &TrackLayout {
        &self.track
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }
}

impl<C: Clock + 'static> Simulation for RaceSimulation<C> {
    fn tick(&mut self, delta_time: f32) {
        let timestep = self.physics.timestep();
        self.step_accumulator += delta_time;

        let mut steps = 0;
        while self.step_accumulator >= timestep {
            if steps == self.config.physics.max_steps_per_frame {
                // Too far behind to catch up; drop the backlog
                debug!(backlog = self.step_accumulator, "Dropping physics backlog");
                self.step_accumulator = 0.0;
                break;
            }
            self.step_accumulator -= timestep;
            self.step();
            steps += 1;
        }
    }

    fn reset(&mut self) {
        self.restart();
    }

    fn name(&self) -> &str {
        RACE_SIMULATION
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Name the race registers under in the [`World`](super::World)
pub const RACE_SIMULATION: &str = "race";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::clock::ManualClock;
    use crate::sim::physics::VehiclePose;
    use crate::sim::World;
    use crate::sim::vehicle::Action;

    fn race() -> (RaceSimulation<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let race = RaceSimulation::with_clock(
            RaceConfig::default(),
            TrackLayout::workshop(),
            clock.clone(),
        )
        .expect("race builds");
        (race, clock)
    }

    fn away_from_goal() -> VehiclePose {
        VehiclePose {
            position: [10.0, 35.0],
            angle: 0.0,
        }
    }

    #[test]
    fn test_leaving_goal_starts_timer() {
        let (mut race, _clock) = race();
        race.step();
        assert!(!race.lap_timer().is_running());

        race.physics_mut().teleport_vehicle(away_from_goal());
        race.step();
        assert!(race.lap_timer().is_running());
        assert!(race.lap_timer().best_laps().is_empty());
    }

    #[test]
    fn test_second_goal_exit_records_lap() {
        let (mut race, clock) = race();
        race.step();
        race.physics_mut().teleport_vehicle(away_from_goal());
        race.step();

        clock.set_ms(15_000);
        race.physics_mut().reset_vehicle();
        race.step();
        race.physics_mut().teleport_vehicle(away_from_goal());
        race.step();

        let laps = race.lap_timer().best_laps();
        assert_eq!(laps.len(), 1);
        assert_eq!(laps[0].lap_time_ms, 15_000);
    }

    #[test]
    fn test_wall_contact_adds_penalty() {
        let (mut race, clock) = race();
        race.step();
        race.physics_mut().teleport_vehicle(away_from_goal());
        race.step();

        clock.set_ms(2_000);
        race.physics_mut().teleport_vehicle(VehiclePose {
            position: [-10.0, -0.2],
            angle: 0.0,
        });
        race.step();
        race.step();

        assert_eq!(race.lap_timer().current_penalties(), Some(1));
    }

    #[test]
    fn test_reset_action_stops_timer_and_returns_vehicle() {
        let (mut race, _clock) = race();
        race.step();
        race.physics_mut().teleport_vehicle(away_from_goal());
        race.step();
        assert!(race.lap_timer().is_running());

        let mut actions = ControlState::default();
        actions[Action::Reset] = true;
        race.set_controls(actions, None);
        race.step();

        assert!(!race.lap_timer().is_running());
        let pose = race.physics().vehicle_pose();
        assert!((pose.position[1] - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_tick_runs_fixed_steps() {
        let (mut race, _clock) = race();
        let timestep = race.physics().timestep();

        race.tick(timestep * 2.5);
        assert_eq!(race.physics().steps(), 2);

        race.tick(timestep * 0.6);
        assert_eq!(race.physics().steps(), 3);
    }

    #[test]
    fn test_lap_clock_stands_still_while_world_paused() {
        let race = RaceSimulation::new(RaceConfig::default()).expect("race builds");
        let timestep = race.physics().timestep();
        let mut world = World::with_race(race);

        world.tick(timestep);
        world
            .race_mut()
            .expect("race registered")
            .physics_mut()
            .teleport_vehicle(away_from_goal());
        for _ in 0..10 {
            world.tick(timestep);
        }
        let elapsed = |world: &World| {
            world
                .race()
                .and_then(|race| race.lap_timer().current_elapsed_ms())
                .expect("lap running")
        };
        let before = elapsed(&world);

        world.pause();
        for _ in 0..120 {
            world.tick(timestep);
        }
        assert_eq!(elapsed(&world), before);

        world.resume();
        world.tick(timestep);
        let after = elapsed(&world);
        assert!(after > before && after - before <= 17, "{before} -> {after}");
    }

    #[test]
    fn test_lap_clock_follows_time_scale() {
        let race = RaceSimulation::new(RaceConfig::default()).expect("race builds");
        let timestep = race.physics().timestep();
        let mut world = World::with_race(race);

        world.tick(timestep);
        world
            .race_mut()
            .expect("race registered")
            .physics_mut()
            .teleport_vehicle(away_from_goal());
        world.tick(timestep);

        // Half speed: 60 frames of wall time are 30 physics steps
        world.set_time_scale(0.5);
        for _ in 0..60 {
            world.tick(timestep);
        }

        let elapsed = world
            .race()
            .and_then(|race| race.lap_timer().current_elapsed_ms())
            .expect("lap running");
        assert!((490..=510).contains(&elapsed), "elapsed {elapsed}ms");
    }

    #[test]
    fn test_tick_caps_catch_up_steps() {
        let (mut race, _clock) = race();
        race.tick(10.0);
        assert_eq!(
            race.physics().steps(),
            u64::from(RaceConfig::default().physics.max_steps_per_frame)
        );
    }
}
