//! Debug UI state and rendering

use std::collections::VecDeque;
use std::time::Instant;

use sysinfo::System;

use super::input::InputContext;
use crate::sim::World;

const FRAME_HISTORY: usize = 100;

/// Debug UI state for toggling different panels
#[derive(Debug, Clone)]
pub struct DebugUIState {
    pub show_window: bool,
    pub show_fps: bool,
    pub show_world_state: bool,
    pub show_race_state: bool,
    pub show_input: bool,
    pub show_renderer_info: bool,
    pub show_system_info: bool,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
    system: Option<SystemSummary>,
}

/// Host facts gathered once, the first time the panel is opened
#[derive(Debug, Clone)]
struct SystemSummary {
    os: String,
    kernel: String,
    physical_cores: usize,
    logical_cores: usize,
    total_memory_gb: f64,
}

impl SystemSummary {
    fn gather() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let unknown = || "Unknown".to_string();
        Self {
            os: format!(
                "{} {}",
                System::name().unwrap_or_else(unknown),
                System::os_version().unwrap_or_else(unknown)
            ),
            kernel: System::kernel_version().unwrap_or_else(unknown),
            physical_cores: System::physical_core_count().unwrap_or(0),
            logical_cores: sys.cpus().len(),
            total_memory_gb: sys.total_memory() as f64 / 1_073_741_824.0,
        }
    }
}

impl Default for DebugUIState {
    fn default() -> Self {
        Self {
            show_window: cfg!(debug_assertions),
            show_fps: true,
            show_world_state: true,
            show_race_state: true,
            show_input: false,
            show_renderer_info: false,
            show_system_info: false,
            frame_times: VecDeque::with_capacity(FRAME_HISTORY),
            last_frame_time: Instant::now(),
            system: None,
        }
    }
}

impl DebugUIState {
    pub fn toggle_window(&mut self) {
        self.show_window = !self.show_window;
    }

    /// Updates frame timing information
    pub fn update_frame_time(&mut self) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_HISTORY {
            self.frame_times.pop_front();
        }
    }

    /// Average FPS over the recorded frame history
    pub fn fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    pub fn render(
        &mut self,
        ctx: &egui::Context,
        world: &World,
        surface_config: &wgpu::SurfaceConfiguration,
        input: &InputContext,
    ) {
        self.update_frame_time();

        if !self.show_window {
            return;
        }

        egui::Window::new("Debug Info")
            .default_pos([10.0, 200.0])
            .default_width(300.0)
            .resizable(true)
            .scroll([false, true])
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.checkbox(&mut self.show_fps, "FPS");
                    ui.checkbox(&mut self.show_world_state, "World");
                    ui.checkbox(&mut self.show_race_state, "Race");
                    ui.checkbox(&mut self.show_input, "Input");
                    ui.checkbox(&mut self.show_renderer_info, "Renderer");
                    ui.checkbox(&mut self.show_system_info, "System");
                });
                ui.separator();

                if self.show_fps {
                    ui.heading("FPS");
                    ui.label(format!("FPS: {:.1}", self.fps()));
                    let last_ms = self.frame_times.back().copied().unwrap_or(0.0) * 1000.0;
                    ui.label(format!("Frame time: {:.2}ms", last_ms));
                    ui.separator();
                }

                if self.show_world_state {
                    ui.heading("World State");
                    ui.label(format!("Simulation time: {:.2}s", world.sim_time()));
                    ui.label(format!("Tick count: {}", world.tick_count()));
                    ui.label(format!("Time scale: {:.2}x", world.time_scale()));
                    ui.label(format!("Paused: {}", world.is_paused()));
                    ui.separator();
                }

                if self.show_race_state
                    && let Some(race) = world.race()
                {
                    let physics = race.physics();
                    let pose = physics.vehicle_pose();
                    let timer = race.lap_timer();

                    ui.heading("Race");
                    ui.label(format!("Physics steps: {}", physics.steps()));
                    ui.label(format!(
                        "Vehicle: ({:.2}, {:.2}) @ {:.1}°",
                        pose.position[0],
                        pose.position[1],
                        pose.angle.to_degrees()
                    ));
                    ui.label(format!("Speed: {:.2} m/s", physics.vehicle_speed()));
                    ui.label(format!("Timer running: {}", timer.is_running()));
                    ui.label(format!("Laps completed: {}", timer.laps_completed()));
                    if let Some(lap) = timer.last_lap() {
                        ui.label(format!(
                            "Last lap: {}ms + {} penalties (score {})",
                            lap.lap_time_ms,
                            lap.penalties,
                            lap.score()
                        ));
                    }
                    ui.separator();
                }

                if self.show_input {
                    ui.heading("Input");
                    for (name, priority) in input.debug_handlers() {
                        ui.label(format!("{name} (priority {priority})"));
                    }
                    for event in input.debug_last_events() {
                        ui.monospace(event);
                    }
                    ui.separator();
                }

                if self.show_renderer_info {
                    ui.heading("Renderer Info");
                    ui.label(format!(
                        "Surface: {}x{}",
                        surface_config.width, surface_config.height
                    ));
                    ui.label(format!("Format: {:?}", surface_config.format));
                    ui.label(format!("Present mode: {:?}", surface_config.present_mode));
                    ui.separator();
                }

                if self.show_system_info {
                    let system = self.system.get_or_insert_with(SystemSummary::gather);
                    ui.heading("System Info");
                    ui.label(format!("OS: {}", system.os));
                    ui.label(format!("Kernel: {}", system.kernel));
                    ui.label(format!("Physical cores: {}", system.physical_cores));
                    ui.label(format!("Logical cores: {}", system.logical_cores));
                    ui.label(format!("Memory: {:.1} GB", system.total_memory_gb));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_without_frames_is_zero() {
        assert_eq!(DebugUIState::default().fps(), 0.0);
    }

    #[test]
    fn test_frame_history_is_bounded() {
        let mut state = DebugUIState::default();
        for _ in 0..(FRAME_HISTORY + 20) {
            state.update_frame_time();
        }
        assert_eq!(state.frame_times.len(), FRAME_HISTORY);
    }

    #[test]
    fn test_toggle_window() {
        let mut state = DebugUIState::default();
        let initial = state.show_window;
        state.toggle_window();
        assert_ne!(state.show_window, initial);
    }
}
