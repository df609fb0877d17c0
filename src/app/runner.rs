//! Main application handler for the game

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use super::config::AppConfig;
use super::debug_ui::DebugUIState;
use super::hud;
use super::input::{GamepadPoller, InputCollector, InputContext, RaceCommand, RaceInputHandler};
use super::renderer::Renderer;
use super::track_view::TrackView;
use super::window::window_attributes_from_config;
use crate::sim::race::RaceSimulation;
use crate::sim::{SimError, World};

/// Main game application
pub struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    world: World,
    debug_ui: DebugUIState,
    last_update: Option<Instant>,
    input_collector: InputCollector,
    input_context: InputContext,
    gamepad: GamepadPoller,
}

impl App {
    /// Creates a new game application with the provided configuration
    pub fn new(config: AppConfig) -> Result<Self, SimError> {
        info!(profile = %config.profile, "Starting game");
        info!(?config.window, "Window configuration");
        debug!(?config.physics, ?config.vehicle, ?config.lap_timer, "Race tuning");

        let race = RaceSimulation::new(config.race_config())?;

        let mut input_context = InputContext::new();
        input_context.register_handler(Box::new(RaceInputHandler::default()));

        Ok(Self {
            config,
            window: None,
            renderer: None,
            world: World::with_race(race),
            debug_ui: DebugUIState::default(),
            last_update: None,
            input_collector: InputCollector::new(),
            input_context,
            gamepad: GamepadPoller::new(),
        })
    }
}

impl App {
    /// Feeds this frame's keyboard and gamepad state into the race
    fn process_input(&mut self, event_loop: &ActiveEventLoop) {
        // Clone state BEFORE advancing so handlers see this frame's edges
        let input_state = self.input_collector.clone_state();
        self.input_context.update_state(input_state);
        self.input_context.process();
        self.input_collector.advance_frame();

        let Some(handler) = self
            .input_context
            .handler_typed_mut::<RaceInputHandler>(RaceInputHandler::NAME)
        else {
            return;
        };
        let commands = handler.take_commands();
        let controls = handler.controls();

        for command in commands {
            match command {
                RaceCommand::Quit => {
                    info!("Quit requested, exiting");
                    event_loop.exit();
                }
                RaceCommand::TogglePause => {
                    self.world.toggle_pause();
                    info!(paused = self.world.is_paused(), "Pause toggled");
                }
                RaceCommand::ToggleDebugWindow => {
                    if cfg!(debug_assertions) {
                        self.debug_ui.toggle_window();
                    }
                }
            }
        }

        let gamepad = self.gamepad.poll();
        if let Some(race) = self.world.race_mut() {
            race.set_controls(controls, gamepad);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let world = &self.world;
        let debug_ui = &mut self.debug_ui;
        let input_context = &self.input_context;
        let surface_config = renderer.config().clone();

        let result = renderer.draw(window, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    if let Some(race) = world.race() {
                        let rect = ui.max_rect();
                        TrackView::new(race, rect).paint(ui.painter(), race);
                    }
                });

            if let Some(race) = world.race() {
                hud::show(ctx, &hud::hud_lines(race.lap_timer()));
            }

            debug_ui.render(ctx, world, &surface_config, input_context);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                let size = window.inner_size();
                renderer.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => {
                error!(error = %e, "Render error");
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        info!(
            window.width = size.width,
            window.height = size.height,
            "Window created successfully"
        );

        // winit's event loop is synchronous; wgpu setup is not
        let renderer = tokio::runtime::Runtime::new()
            .map_err(anyhow::Error::from)
            .and_then(|runtime| {
                runtime.block_on(Renderer::new(window.clone(), self.config.window.vsync))
            });

        match renderer {
            Ok(renderer) => {
                info!("Renderer initialized successfully");
                self.renderer = Some(renderer);
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize renderer");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        let delta_time = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        // Input BEFORE simulation so this frame's controls drive this frame's steps
        self.process_input(event_loop);
        self.world.tick(delta_time);

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Raw input first so held keys are tracked even when egui wants them
        self.input_collector.handle_window_event(&event);

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let _ = renderer.handle_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(race) = self.world.race() {
            let timer = race.lap_timer();
            info!(
                laps = timer.laps_completed(),
                best_ms = timer.leaderboard().best().map(|lap| lap.score()),
                "Session finished"
            );
        }
    }
}
