//! Configuration system health check

use crate::app::AppConfig;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that every profile loads and validates
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failures = 0;

        let defaults = AppConfig::default();
        if let Err(e) = defaults.validate() {
            return CheckResult::fail(format!("Built-in defaults are invalid: {e}"));
        }
        details.push("  ✓ Built-in defaults validate".to_string());

        // Loading validates, so a bad tuning value fails here too
        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => {
                    details.push(format!(
                        "  ✓ Profile '{}': timestep {:.4}s, thrust {}, torque {}, leaderboard {}",
                        profile,
                        config.physics.timestep,
                        config.vehicle.thrust,
                        config.vehicle.torque,
                        config.lap_timer.leaderboard_size
                    ));
                }
                Err(e) => {
                    details.push(format!("  ✗ Profile '{}': {}", profile, e));
                    failures += 1;
                }
            }
        }

        let env_warning = match AppConfig::load_from_env() {
            Ok(config) => {
                details.push(format!(
                    "  ✓ Environment config: profile '{}' loaded",
                    config.profile
                ));
                false
            }
            Err(e) => {
                details.push(format!("  ⚠ Environment config: {}", e));
                true
            }
        };

        if AppConfig::find_config_dir().is_none() {
            details.push("  ⚠ No config directory found, running on defaults".to_string());
        }

        let details = details.join("\n");
        if failures > 0 {
            CheckResult::fail(format!("{failures} config profile(s) failed to load"))
                .with_details(details)
        } else if env_warning {
            CheckResult::warn("Config loaded with warnings").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
