//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build information is accessible and valid
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let details = [
            format!("  Version: {}", build_info::version_string()),
            format!(
                "  Git: {}@{} (dirty: {})",
                build_info::GIT_BRANCH,
                build_info::git_sha_short(),
                build_info::is_git_dirty()
            ),
            format!("  Build time: {}", build_info::BUILD_TIMESTAMP),
            format!(
                "  Rustc: {} ({})",
                build_info::RUSTC_SEMVER,
                build_info::RUSTC_CHANNEL
            ),
            format!("  Target: {}", build_info::CARGO_TARGET_TRIPLE),
            format!("  Opt level: {}", build_info::CARGO_OPT_LEVEL),
        ];

        let details = details.join("\n");
        if build_info::GIT_SHA == "unknown" {
            CheckResult::warn("Built outside a git checkout").with_details(details)
        } else {
            CheckResult::pass("Build metadata accessible").with_details(details)
        }
    }
}
