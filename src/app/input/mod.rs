//! Input handling system
//!
//! Provides a priority-based input routing system that:
//! - Collects raw keyboard input from winit events
//! - Generates key press/release events from per-frame edges
//! - Routes events to handlers in priority order
//! - Supports event consumption to prevent input conflicts
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → InputState
//!                                          ↓
//!                                    InputContext
//!                                    (generates events)
//!                                          ↓
//!                                   InputHandlers
//!                                   (by priority)
//! ```
//!
//! Gamepads bypass this path: [`GamepadPoller`] is sampled once per frame.

mod collector;
mod context;
mod events;
mod gamepad;
mod handler;
mod race_handler;
mod state;

pub use collector::InputCollector;
pub use context::InputContext;
pub use events::{InputEvent, KeyCode};
pub use gamepad::GamepadPoller;
pub use handler::InputHandler;
pub use race_handler::{KeyBindings, RaceCommand, RaceInputHandler};
pub use state::{ButtonState, InputState, KeyboardState, Modifiers};
