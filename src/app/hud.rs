//! Lap-time overlay drawn on top of the track

use crate::sim::clock::Clock;
use crate::sim::lap_timer::LapTimer;

/// Overlay text, one entry per line
///
/// Best laps first (only once there are any), then the running lap.
pub fn hud_lines<C: Clock>(timer: &LapTimer<C>) -> Vec<String> {
    let mut lines = Vec::new();

    let laps = timer.best_laps();
    if !laps.is_empty() {
        lines.push("Best lap times:".to_string());
        for lap in laps {
            lines.push(format!(
                "- {:.2}s ({} penalties)",
                lap.lap_time_ms as f64 / 1000.0,
                lap.penalties
            ));
        }
        lines.push(String::new());
    }

    if let (Some(elapsed), Some(penalties)) = (timer.current_elapsed_ms(), timer.current_penalties())
    {
        lines.push(format!("Lap time: {elapsed}ms, penalties: {penalties}"));
    }

    lines
}

/// Paints the overlay in the top-left corner without taking input
pub fn show(ctx: &egui::Context, lines: &[String]) {
    if lines.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("lap_hud"))
        .fixed_pos(egui::pos2(12.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            for line in lines {
                ui.label(
                    egui::RichText::new(line)
                        .monospace()
                        .color(egui::Color32::WHITE),
                );
            }
        });
}
