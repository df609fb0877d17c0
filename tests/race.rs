//! Headless races driven through the public API

use std::time::Duration;

use lap_racer::sim::clock::ManualClock;
use lap_racer::sim::physics::VehiclePose;
use lap_racer::sim::race::{RaceConfig, RaceSimulation};
use lap_racer::sim::track::TrackLayout;
use lap_racer::sim::vehicle::{Action, ControlState};
use lap_racer::sim::{Simulation, World};

const OPEN_TRACK: VehiclePose = VehiclePose {
    position: [10.0, 35.0],
    angle: 0.0,
};

const ON_BOTTOM_WALL: VehiclePose = VehiclePose {
    position: [-10.0, -0.2],
    angle: 0.0,
};

struct Harness {
    race: RaceSimulation<ManualClock>,
    clock: ManualClock,
}

impl Harness {
    fn new() -> Self {
        let clock = ManualClock::new();
        let race = RaceSimulation::with_clock(
            RaceConfig::default(),
            TrackLayout::workshop(),
            clock.clone(),
        )
        .expect("workshop race builds");
        let mut harness = Self { race, clock };
        // Settle on the goal the vehicle spawns on
        harness.race.step();
        harness
    }

    fn leave_goal(&mut self) {
        self.race.physics_mut().teleport_vehicle(OPEN_TRACK);
        self.race.step();
    }

    fn hit_wall(&mut self) {
        self.race.physics_mut().teleport_vehicle(ON_BOTTOM_WALL);
        self.race.step();
        self.race.physics_mut().teleport_vehicle(OPEN_TRACK);
        self.race.step();
    }

    /// Back over the line and out again: finishes one lap, starts the next
    fn cross_line(&mut self) {
        self.race.physics_mut().reset_vehicle();
        self.race.step();
        self.leave_goal();
    }

    fn wait_ms(&self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
    }
}

#[test]
fn test_full_session_keeps_five_best_laps() {
    let mut h = Harness::new();
    h.leave_goal();

    for lap_ms in [40_000, 30_000, 35_000, 20_000, 25_000, 45_000, 22_000] {
        h.wait_ms(lap_ms);
        h.cross_line();
    }

    let timer = h.race.lap_timer();
    assert_eq!(timer.laps_completed(), 7);
    let times: Vec<u64> = timer.best_laps().iter().map(|lap| lap.lap_time_ms).collect();
    assert_eq!(times, [20_000, 22_000, 25_000, 30_000, 35_000]);
    assert_eq!(timer.last_lap().map(|lap| lap.lap_time_ms), Some(22_000));
}

#[test]
fn test_wall_penalties_debounced_and_scored() {
    let mut h = Harness::new();
    h.leave_goal();

    h.hit_wall(); // t=0, counts
    h.wait_ms(900);
    h.hit_wall(); // inside the cooldown
    h.wait_ms(300);
    h.hit_wall(); // 1200ms after the first, counts
    h.wait_ms(3_800);
    h.cross_line();

    let lap = h.race.lap_timer().best_laps()[0];
    assert_eq!(lap.lap_time_ms, 5_000);
    assert_eq!(lap.penalties, 2);
    assert_eq!(lap.score(), 7_000);
}

#[test]
fn test_penalty_slows_a_faster_lap_out_of_first_place() {
    let mut h = Harness::new();
    h.leave_goal();

    h.wait_ms(10_000);
    h.cross_line();

    h.hit_wall();
    h.wait_ms(9_500);
    h.cross_line();

    let laps = h.race.lap_timer().best_laps();
    assert_eq!(laps[0].lap_time_ms, 10_000);
    assert_eq!(laps[1].lap_time_ms, 9_500);
    assert_eq!(laps[1].score(), 10_500);
}

#[test]
fn test_reset_abandons_lap_but_keeps_leaderboard() {
    let mut h = Harness::new();
    h.leave_goal();
    h.wait_ms(12_000);
    h.cross_line();
    h.hit_wall();

    let mut actions = ControlState::default();
    actions[Action::Reset] = true;
    h.race.set_controls(actions, None);
    h.race.step();
    h.race.set_controls(ControlState::default(), None);
    // Back on the grid, which is the goal
    h.race.step();

    let timer = h.race.lap_timer();
    assert!(!timer.is_running());
    assert_eq!(timer.current_elapsed_ms(), None);
    assert_eq!(timer.best_laps().len(), 1);

    // Next exit starts a clean lap
    h.leave_goal();
    assert_eq!(h.race.lap_timer().current_penalties(), Some(0));
}

#[test]
fn test_keyboard_thrust_drives_through_world() {
    let mut race = RaceSimulation::new(RaceConfig::default()).expect("race builds");
    let timestep = race.physics().timestep();
    let start = race.physics().vehicle_pose();

    let mut actions = ControlState::default();
    actions[Action::Thrust] = true;
    race.set_controls(actions, None);

    let mut world = World::with_race(race);
    for _ in 0..30 {
        world.tick(timestep);
    }

    let race = world.race().expect("race registered");
    let end = race.physics().vehicle_pose();
    assert!(end.position[0] > start.position[0] + 0.5);
    assert!(race.physics().vehicle_speed() > 0.0);

    // Driving off the spawn line starts the clock
    assert!(race.lap_timer().is_running());

    world.reset_all_simulations();
    let race = world.race().expect("race registered");
    assert!(!race.lap_timer().is_running());
    assert_eq!(race.name(), "race");
}
