//! Raw input collection from winit events

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::KeyCode;
use super::state::{InputState, Modifiers};

/// Collects raw input from winit events and maintains InputState
pub struct InputCollector {
    state: InputState,
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            state: InputState::new(),
        }
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ModifiersChanged(modifiers_state) => {
                self.state.keyboard.modifiers = Modifiers {
                    shift: modifiers_state.state().shift_key(),
                    ctrl: modifiers_state.state().control_key(),
                    alt: modifiers_state.state().alt_key(),
                    meta: modifiers_state.state().super_key(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(KeyCode::from(code), event.state);
                }
            }

            WindowEvent::Focused(false) => {
                self.state.keyboard.release_all();
            }

            _ => {}
        }
    }

    /// Record a key transition
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if key == KeyCode::Other {
            return;
        }
        match state {
            ElementState::Pressed => self.state.keyboard.press(key),
            ElementState::Released => self.state.keyboard.release(key),
        }
    }

    /// Advance to next frame (transitions edge states to steady states)
    pub fn advance_frame(&mut self) {
        self.state.advance_frame();
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Clone current state for processing
    ///
    /// Cloned rather than taken so held keys survive into the next frame
    pub fn clone_state(&self) -> InputState {
        self.state.clone()
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_are_not_tracked() {
        let mut collector = InputCollector::new();
        collector.handle_key(KeyCode::Other, ElementState::Pressed);
        assert!(collector.state().keyboard.keys.is_empty());
    }

    #[test]
    fn test_press_survives_frame_advance() {
        let mut collector = InputCollector::new();
        collector.handle_key(KeyCode::D, ElementState::Pressed);
        collector.advance_frame();
        collector.advance_frame();
        assert!(collector.state().keyboard.is_down(KeyCode::D));

        collector.handle_key(KeyCode::D, ElementState::Released);
        assert!(!collector.clone_state().keyboard.is_down(KeyCode::D));
    }
}
