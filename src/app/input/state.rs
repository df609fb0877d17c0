//! Raw input state

use std::collections::HashMap;

use super::events::KeyCode;

/// Raw input state snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
}

/// Button press state with edge detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
    /// Pressed and released within this frame; carries both edges
    Tapped,
}

impl ButtonState {
    /// Advance state for next frame (transitions edges to steady states)
    pub fn advance(self) -> Self {
        match self {
            Self::JustPressed => Self::Pressed,
            Self::JustReleased | Self::Tapped => Self::Released,
            state => state,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed | Self::Tapped)
    }

    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased | Self::Tapped)
    }

    /// State after a release event, keeping a press edge from this frame
    fn released(self) -> Self {
        match self {
            Self::JustPressed => Self::Tapped,
            Self::Pressed => Self::JustReleased,
            state => state,
        }
    }
}

/// Keyboard input state
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Keys seen since startup; absent keys are released
    pub keys: HashMap<KeyCode, ButtonState>,
    pub modifiers: Modifiers,
}

impl KeyboardState {
    pub fn key(&self, key: KeyCode) -> ButtonState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.key(key).is_down()
    }

    /// Records a press; OS key repeat must be filtered out by the caller
    pub fn press(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        if !state.is_down() {
            *state = ButtonState::JustPressed;
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        let state = self.keys.entry(key).or_default();
        *state = state.released();
    }

    /// Releases every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        for state in self.keys.values_mut() {
            *state = state.released();
        }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all button states for next frame
    pub fn advance_frame(&mut self) {
        for state in self.keyboard.keys.values_mut() {
            *state = state.advance();
        }
    }
}
