//! Lap timing, wall penalties and the best-lap leaderboard
//!
//! The timer only reacts to the vehicle *leaving* the goal sensor. On a closed
//! loop that single edge is both the finish of one lap and the start of the
//! next, which holds as long as the sensor is crossed once per lap.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{Clock, SimClock};

/// Score cost of a single wall penalty
pub const PENALTY_MS: u64 = 1000;

/// Tuning for the lap timer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LapTimerConfig {
    /// Minimum gap between two penalties; contacts inside it are ignored
    pub penalty_cooldown_ms: u64,
    /// Number of laps kept on the leaderboard
    pub leaderboard_size: usize,
}

impl Default for LapTimerConfig {
    fn default() -> Self {
        Self {
            penalty_cooldown_ms: 1000,
            leaderboard_size: 5,
        }
    }
}

/// A finished (or in-progress) lap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lap {
    pub lap_time_ms: u64,
    pub penalties: u32,
}

impl Lap {
    pub fn new(lap_time_ms: u64, penalties: u32) -> Self {
        Self {
            lap_time_ms,
            penalties,
        }
    }

    /// Ranking value, lower is better
    pub fn score(&self) -> u64 {
        self.lap_time_ms + u64::from(self.penalties) * PENALTY_MS
    }
}

/// Best laps, sorted by ascending score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderBoard {
    entries: Vec<Lap>,
    capacity: usize,
}

impl LeaderBoard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Inserts a lap, keeping earlier laps ahead of later ones on equal score
    ///
    /// Returns the lap's rank (0 = best) if it made the board.
    pub fn insert(&mut self, lap: Lap) -> Option<usize> {
        let rank = self
            .entries
            .partition_point(|entry| entry.score() <= lap.score());
        if rank >= self.capacity {
            return None;
        }

        self.entries.insert(rank, lap);
        self.entries.truncate(self.capacity);
        Some(rank)
    }

    pub fn laps(&self) -> &[Lap] {
        &self.entries
    }

    pub fn best(&self) -> Option<&Lap> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LeaderBoard {
    fn default() -> Self {
        Self::new(LapTimerConfig::default().leaderboard_size)
    }
}

/// Lap timer state machine
///
/// Idle until the vehicle first leaves the goal, then running forever; only
/// [`LapTimer::reset`] brings it back to idle.
#[derive(Debug)]
pub struct LapTimer<C: Clock = SimClock> {
    clock: C,
    penalty_cooldown: Duration,
    running: bool,
    current_lap: Lap,
    start: Duration,
    last_penalty: Option<Duration>,
    leaderboard: LeaderBoard,
    last_lap: Option<Lap>,
    laps_completed: u32,
}

impl<C: Clock> LapTimer<C> {
    pub fn with_clock(config: &LapTimerConfig, clock: C) -> Self {
        Self {
            clock,
            penalty_cooldown: Duration::from_millis(config.penalty_cooldown_ms),
            running: false,
            current_lap: Lap::default(),
            start: Duration::ZERO,
            last_penalty: None,
            leaderboard: LeaderBoard::new(config.leaderboard_size),
            last_lap: None,
            laps_completed: 0,
        }
    }

    /// Vehicle started or stopped touching the goal sensor
    pub fn on_goal_contact_changed(&mut self, is_now_touching: bool) {
        if is_now_touching {
            return;
        }

        let now = self.clock.now();
        if self.running {
            self.current_lap.lap_time_ms = elapsed_ms(self.start, now);
            let lap = std::mem::take(&mut self.current_lap);
            let rank = self.leaderboard.insert(lap);
            self.last_lap = Some(lap);
            self.laps_completed += 1;

            info!(
                lap_time_ms = lap.lap_time_ms,
                penalties = lap.penalties,
                score = lap.score(),
                rank = ?rank,
                "Lap finished"
            );
        }

        self.start = now;
        self.running = true;
    }

    /// Vehicle started or stopped touching anything that is not the goal
    pub fn on_wall_contact_changed(&mut self, is_now_touching: bool) {
        if !is_now_touching || !self.running {
            return;
        }

        let now = self.clock.now();
        let cooled_down = self
            .last_penalty
            .is_none_or(|last| now.saturating_sub(last) > self.penalty_cooldown);

        if !cooled_down {
            // One prolonged scrape counts once per cooldown window
            return;
        }

        self.current_lap.penalties += 1;
        self.last_penalty = Some(now);
        debug!(penalties = self.current_lap.penalties, "Wall penalty");
    }

    /// Stops timing without touching the leaderboard
    pub fn reset(&mut self) {
        self.running = false;
        self.current_lap = Lap::default();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Leaderboard entries, best first
    pub fn best_laps(&self) -> &[Lap] {
        self.leaderboard.laps()
    }

    pub fn leaderboard(&self) -> &LeaderBoard {
        &self.leaderboard
    }

    /// Milliseconds since the current lap started, if one is running
    pub fn current_elapsed_ms(&self) -> Option<u64> {
        self.running
            .then(|| elapsed_ms(self.start, self.clock.now()))
    }

    /// Penalties collected on the current lap, if one is running
    pub fn current_penalties(&self) -> Option<u32> {
        self.running.then_some(self.current_lap.penalties)
    }

    /// Most recently finished lap, whether or not it made the leaderboard
    pub fn last_lap(&self) -> Option<Lap> {
        self.last_lap
    }

    pub fn laps_completed(&self) -> u32 {
        self.laps_completed
    }
}

fn elapsed_ms(start: Duration, now: Duration) -> u64 {
    now.saturating_sub(start).as_millis() as u64
}
