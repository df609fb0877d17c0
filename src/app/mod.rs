//! Game application module
//!
//! Handles windowing, rendering, and user input.

pub mod config;
mod debug_ui;
pub mod hud;
pub mod input;
mod renderer;
mod runner;
pub mod track_view;
mod window;

pub use config::{AppConfig, WindowConfig};
pub use runner::App;
pub use window::window_attributes_from_config;
