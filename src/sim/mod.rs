//! Game simulation module
//!
//! Handles race state, lap timing and rigid-body physics. Nothing in here
//! knows about windows, GPUs or input devices.

pub mod camera;
pub mod clock;
pub mod contact;
pub mod lap_timer;
pub mod physics;
pub mod race;
pub mod track;
pub mod vehicle;

use std::any::Any;

use thiserror::Error;

use race::{RACE_SIMULATION, RaceSimulation};

/// Errors raised while building simulation state
#[derive(Debug, Error)]
pub enum SimError {
    #[error("degenerate {0} shape")]
    DegenerateShape(&'static str),
}

/// Trait that all game simulations must implement
///
/// This allows the World to contain and manage multiple different game systems
/// in a pluggable way. Each simulation is responsible for its own state and logic.
pub trait Simulation {
    /// Updates the simulation by one tick
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last tick in seconds
    fn tick(&mut self, delta_time: f32);

    /// Resets the simulation to its initial state
    fn reset(&mut self);

    /// Returns the name/identifier of this simulation
    fn name(&self) -> &str;

    /// Returns true if the simulation is currently active
    fn is_active(&self) -> bool {
        true
    }

    /// Allows downcasting to concrete types for specific operations
    fn as_any(&self) -> &dyn Any;

    /// Mutable version of as_any for type-safe mutable access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Game world state
pub struct World {
    /// Total number of frames ticked
    tick_count: u64,
    /// Total simulation time elapsed in seconds
    sim_time: f64,
    /// Time scale multiplier (1.0 = normal speed, 2.0 = 2x speed)
    time_scale: f32,
    /// Whether the simulation is paused
    paused: bool,
    simulations: Vec<Box<dyn Simulation>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// World with the race already registered
    pub fn with_race(race: RaceSimulation) -> Self {
        let mut world = Self::new();
        world.add_simulation(Box::new(race));
        world
    }

    /// Builder method to set the time scale
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Builder method to set the paused state
    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    /// Advances every active simulation by one frame
    pub fn tick(&mut self, delta_time: f32) {
        if self.paused {
            return;
        }

        let scaled_delta = delta_time * self.time_scale;
        self.tick_count += 1;
        self.sim_time += scaled_delta as f64;

        for sim in &mut self.simulations {
            if sim.is_active() {
                sim.tick(scaled_delta);
            }
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns the total simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn add_simulation(&mut self, sim: Box<dyn Simulation>) {
        self.simulations.push(sim);
    }

    pub fn simulations(&self) -> &[Box<dyn Simulation>] {
        &self.simulations
    }

    /// Gets a reference to a specific simulation by name
    pub fn get_simulation(&self, name: &str) -> Option<&dyn Simulation> {
        self.simulations
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// Gets a mutable reference to a specific simulation by name
    pub fn get_simulation_mut(&mut self, name: &str) -> Option<&mut (dyn Simulation + 'static)> {
        self.simulations
            .iter_mut()
            .find(|s| s.name() == name)
            .map(|s| s.as_mut())
    }

    /// Gets a typed reference to a specific simulation
    ///
    /// # Example
    /// ```ignore
    /// if let Some(race) = world.get_simulation_typed::<RaceSimulation>("race") {
    ///     println!("{} laps", race.lap_timer().laps_completed());
    /// }
    /// ```
    pub fn get_simulation_typed<T: 'static>(&self, name: &str) -> Option<&T> {
        self.get_simulation(name)
            .and_then(|s| s.as_any().downcast_ref::<T>())
    }

    /// Gets a mutable typed reference to a specific simulation
    pub fn get_simulation_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_simulation_mut(name)
            .and_then(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// The race, if one is registered
    pub fn race(&self) -> Option<&RaceSimulation> {
        self.get_simulation_typed(RACE_SIMULATION)
    }

    pub fn race_mut(&mut self) -> Option<&mut RaceSimulation> {
        self.get_simulation_typed_mut(RACE_SIMULATION)
    }

    /// Resets all simulations to their initial state
    pub fn reset_all_simulations(&mut self) {
        for sim in &mut self.simulations {
            sim.reset();
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            tick_count: 0,
            sim_time: 0.0,
            time_scale: 1.0,
            paused: false,
            simulations: Vec::new(),
        }
    }
}
