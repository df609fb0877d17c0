//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::sim::lap_timer::LapTimerConfig;
use crate::sim::physics::PhysicsConfig;
use crate::sim::race::RaceConfig;
use crate::sim::vehicle::VehicleConfig;

/// Profile used when `APP_PROFILE` is unset
pub const DEFAULT_PROFILE: &str = "debug";

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in pixels
    pub width: f64,
    /// Logical height in pixels
    pub height: f64,
    pub fullscreen: bool,
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lap Racer".to_string(),
            width: 1024.0,
            height: 1024.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
    pub window: WindowConfig,
    pub physics: PhysicsConfig,
    pub vehicle: VehicleConfig,
    pub lap_timer: LapTimerConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_VEHICLE__THRUST=900)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(profile, Self::environment())
    }

    /// Environment source for `APP_`-prefixed overrides
    ///
    /// `_` ends the prefix and `__` separates nested fields, so
    /// `APP_VEHICLE__GAMEPAD_DEAD_ZONE` maps to `vehicle.gamepad_dead_zone`.
    pub fn environment() -> Environment {
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Same as [`AppConfig::load`] with an explicit environment source
    pub fn load_with_env(profile: &str, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        builder = match Self::find_config_dir() {
            Some(dir) => {
                builder.add_source(File::from(dir.join(profile).as_path()).required(false))
            }
            None => builder.add_source(File::with_name(&format!("config/{profile}")).required(false)),
        };

        builder = builder.add_source(env);

        let config: Self = builder.set_override("profile", profile)?.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to [`DEFAULT_PROFILE`]
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
        Self::load(&profile)
    }

    /// Finds the config directory by searching in multiple locations
    pub fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Rejects tuning values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("window.width", self.window.width as f32),
            ("window.height", self.window.height as f32),
            ("physics.timestep", self.physics.timestep),
            ("vehicle.torque", self.vehicle.torque),
            ("vehicle.thrust", self.vehicle.thrust),
            ("vehicle.density", self.vehicle.density),
        ];
        for (key, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(invalid(key, "must be positive"));
            }
        }

        let non_negative = [
            ("vehicle.friction", self.vehicle.friction),
            ("vehicle.linear_damping", self.vehicle.linear_damping),
            ("vehicle.angular_damping", self.vehicle.angular_damping),
        ];
        for (key, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(invalid(key, "must not be negative"));
            }
        }

        if !(0.0..1.0).contains(&self.vehicle.gamepad_dead_zone) {
            return Err(invalid("vehicle.gamepad_dead_zone", "must be in [0, 1)"));
        }
        if self.physics.max_steps_per_frame == 0 {
            return Err(invalid("physics.max_steps_per_frame", "must be at least 1"));
        }
        if self.lap_timer.leaderboard_size == 0 {
            return Err(invalid("lap_timer.leaderboard_size", "must be at least 1"));
        }

        Ok(())
    }

    /// The simulation-facing part of the configuration
    pub fn race_config(&self) -> RaceConfig {
        RaceConfig {
            physics: self.physics.clone(),
            vehicle: self.vehicle.clone(),
            lap_timer: self.lap_timer.clone(),
        }
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Message(format!("{key} {reason}"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            physics: PhysicsConfig::default(),
            vehicle: VehicleConfig::default(),
            lap_timer: LapTimerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.lap_timer.leaderboard_size, 5);
        assert_eq!(config.vehicle.thrust, 1200.0);
    }

    #[test]
    fn test_validate_rejects_zero_thrust() {
        let mut config = AppConfig::default();
        config.vehicle.thrust = 0.0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("vehicle.thrust"));
    }

    #[test]
    fn test_validate_rejects_bad_dead_zone() {
        let mut config = AppConfig::default();
        config.vehicle.gamepad_dead_zone = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_leaderboard() {
        let mut config = AppConfig::default();
        config.lap_timer.leaderboard_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_race_config_carries_tuning() {
        let mut config = AppConfig::default();
        config.vehicle.torque = 42.0;
        config.physics.max_steps_per_frame = 2;

        let race = config.race_config();
        assert_eq!(race.vehicle.torque, 42.0);
        assert_eq!(race.physics.max_steps_per_frame, 2);
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::environment().source(Some(vars))
    }

    #[test]
    fn test_env_overrides_nested_field() {
        let config =
            AppConfig::load_with_env("no-such-profile", env(&[("APP_VEHICLE__THRUST", "900")]))
                .unwrap();
        assert_eq!(config.vehicle.thrust, 900.0);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = AppConfig::load_with_env(
            "no-such-profile",
            env(&[
                ("APP_VEHICLE__TORQUE", "50"),
                ("APP_VEHICLE__GAMEPAD_DEAD_ZONE", "0.2"),
                ("APP_PHYSICS__MAX_STEPS_PER_FRAME", "2"),
                ("APP_LAP_TIMER__PENALTY_COOLDOWN_MS", "1500"),
            ]),
        )
        .unwrap();

        assert_eq!(config.vehicle.torque, 50.0);
        assert_eq!(config.vehicle.gamepad_dead_zone, 0.2);
        assert_eq!(config.vehicle.thrust, VehicleConfig::default().thrust);
        assert_eq!(config.physics.max_steps_per_frame, 2);
        assert_eq!(config.physics.timestep, PhysicsConfig::default().timestep);
        assert_eq!(config.lap_timer.penalty_cooldown_ms, 1500);
        assert_eq!(config.lap_timer.leaderboard_size, 5);
    }

    #[test]
    fn test_env_override_is_validated() {
        let result =
            AppConfig::load_with_env("no-such-profile", env(&[("APP_VEHICLE__THRUST", "-1")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_profile_uses_defaults() {
        let config = AppConfig::load_with_env("no-such-profile", env(&[])).unwrap();
        assert_eq!(config.profile, "no-such-profile");
        assert_eq!(config.physics, PhysicsConfig::default());
    }
}
