//! Integration tests for the health check system

use lap_racer::health::{self, HealthCheckRunner, SystemCheck, checks::*};

fn assert_ok(check: impl SystemCheck) {
    let result = check.check();
    assert!(
        result.status.is_ok(),
        "{} check failed: {}\n{}",
        check.name(),
        result.message,
        result.details.unwrap_or_default()
    );
}

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 6);
}

#[test]
fn test_config_check() {
    assert_ok(ConfigCheck::new());
}

#[test]
fn test_config_check_with_missing_profile_falls_back() {
    // Missing files are optional; defaults still validate
    assert_ok(ConfigCheck::with_profiles(vec!["does-not-exist"]));
}

#[test]
fn test_world_check() {
    assert_ok(WorldCheck::new());
}

#[test]
fn test_track_check() {
    assert_ok(TrackCheck::new());
}

#[test]
fn test_egui_context_check() {
    assert_ok(EguiContextCheck::new());
}

#[test]
fn test_egui_context_check_renders_lap_hud() {
    let result = EguiContextCheck::new().check();
    let details = result.details.unwrap_or_default();
    // Leaderboard header, one lap, spacer, running lap
    assert!(details.contains("HUD rendered 4 lines"), "{details}");
}

#[test]
fn test_build_info_check() {
    assert_ok(BuildInfoCheck::new());
}

#[test]
fn test_system_info_check() {
    assert_ok(SystemInfoCheck::new());
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(WorldCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
    assert!(report.result("World/Simulation").is_some());
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(TrackCheck::new()).run();

    if report.failed > 0 {
        assert_eq!(report.exit_code(), 1);
    } else if report.warned > 0 {
        assert_eq!(report.exit_code(), 2);
    } else {
        assert_eq!(report.exit_code(), 0);
    }
}
