//! Egui context health check

use egui::Context;

use crate::app::hud;
use crate::app::track_view::TrackView;
use crate::health::check::{CheckResult, SystemCheck};
use crate::sim::physics::VehiclePose;
use crate::sim::race::{RaceConfig, RaceSimulation};

/// Runs the race overlay and track painter through a headless egui frame
pub struct EguiContextCheck;

impl EguiContextCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EguiContextCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for EguiContextCheck {
    fn name(&self) -> &'static str {
        "Egui Context"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates the HUD and track painter produce geometry without a GPU")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let mut race = match RaceSimulation::new(RaceConfig::default()) {
            Ok(race) => race,
            Err(e) => return CheckResult::fail(format!("Race failed to build: {e}")),
        };
        drive_short_lap(&mut race);

        let ctx = Context::default();
        let raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1024.0, 768.0),
            )),
            ..Default::default()
        };

        let hud_lines = hud::hud_lines(race.lap_timer());
        if hud_lines.first().map(String::as_str) != Some("Best lap times:") {
            return CheckResult::fail("HUD is missing the leaderboard after a lap")
                .with_details(hud_lines.join("\n"));
        }
        let mut shape_count = 0;
        let output = ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    let view = TrackView::new(&race, ui.max_rect());
                    let shapes = view.shapes(&race);
                    shape_count = shapes.len();
                    ui.painter().extend(shapes);
                });
            hud::show(ctx, &hud_lines);
        });
        details.push(format!("  ✓ Track view produced {} shapes", shape_count));
        details.push(format!("  ✓ HUD rendered {} lines", hud_lines.len()));

        let primitives = ctx.tessellate(output.shapes, output.pixels_per_point);
        if primitives.is_empty() {
            return CheckResult::fail("Frame tessellated to nothing")
                .with_details(details.join("\n"));
        }
        details.push(format!("  ✓ Tessellated {} clipped primitives", primitives.len()));

        let style = ctx.style();
        details.push(format!(
            "  ✓ Style system accessible (spacing: {:.1}x{:.1})",
            style.spacing.item_spacing.x, style.spacing.item_spacing.y
        ));

        CheckResult::pass("egui renders the race headless").with_details(details.join("\n"))
    }
}

/// One quick lap so the HUD has a leaderboard and a running lap to show
fn drive_short_lap(race: &mut RaceSimulation) {
    let open_track = VehiclePose {
        position: [10.0, 35.0],
        angle: 0.0,
    };

    race.step();
    race.physics_mut().teleport_vehicle(open_track);
    for _ in 0..30 {
        race.step();
    }
    race.physics_mut().reset_vehicle();
    race.step();
    race.physics_mut().teleport_vehicle(open_track);
    race.step();
}
