//! Keyboard handler driving the race

use std::any::Any;

use enum_map::{EnumMap, enum_map};

use super::events::{InputEvent, KeyCode};
use super::handler::InputHandler;
use super::state::InputState;
use crate::sim::vehicle::{Action, ControlState};

/// One-shot requests for the application, drained each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceCommand {
    Quit,
    TogglePause,
    ToggleDebugWindow,
}

/// Keys bound to each logical action
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub actions: EnumMap<Action, Vec<KeyCode>>,
    pub quit: KeyCode,
    pub pause: KeyCode,
    pub debug_window: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            actions: enum_map! {
                Action::TurnLeft => vec![KeyCode::A, KeyCode::Left],
                Action::TurnRight => vec![KeyCode::D, KeyCode::Right],
                Action::Thrust => vec![KeyCode::W, KeyCode::Up],
                Action::Reset => vec![KeyCode::R],
            },
            quit: KeyCode::Q,
            pause: KeyCode::P,
            debug_window: KeyCode::Backquote,
        }
    }
}

/// Maps held keys to a [`ControlState`] and hotkeys to [`RaceCommand`]s
pub struct RaceInputHandler {
    bindings: KeyBindings,
    controls: ControlState,
    commands: Vec<RaceCommand>,
}

impl RaceInputHandler {
    pub const NAME: &'static str = "race";

    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            controls: ControlState::default(),
            commands: Vec::new(),
        }
    }

    /// Actions held as of the last update
    pub fn controls(&self) -> ControlState {
        self.controls
    }

    /// Takes the commands raised since the last call
    pub fn take_commands(&mut self) -> Vec<RaceCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for RaceInputHandler {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

impl InputHandler for RaceInputHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        50
    }

    fn handle_event(&mut self, event: &InputEvent, _state: &InputState) -> bool {
        let InputEvent::KeyPress { key, .. } = event else {
            return false;
        };

        let command = match *key {
            k if k == self.bindings.quit => RaceCommand::Quit,
            k if k == self.bindings.pause => RaceCommand::TogglePause,
            k if k == self.bindings.debug_window => RaceCommand::ToggleDebugWindow,
            _ => return false,
        };
        self.commands.push(command);
        true
    }

    fn update(&mut self, state: &InputState) {
        for (action, keys) in &self.bindings.actions {
            // A tap shorter than a frame still counts for that frame
            self.controls[action] = keys.iter().any(|&key| {
                let button = state.keyboard.key(key);
                button.is_down() || button.is_just_pressed()
            });
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::InputContext;

    fn context_with(keys: &[KeyCode]) -> InputContext {
        let mut context = InputContext::new();
        context.register_handler(Box::new(RaceInputHandler::default()));

        let mut state = InputState::new();
        for &key in keys {
            state.keyboard.press(key);
        }
        context.update_state(state);
        context.process();
        context
    }

    fn handler(context: &mut InputContext) -> &mut RaceInputHandler {
        context
            .handler_typed_mut::<RaceInputHandler>(RaceInputHandler::NAME)
            .unwrap()
    }

    #[test]
    fn test_held_keys_map_to_actions() {
        let mut context = context_with(&[KeyCode::Up, KeyCode::A]);
        let controls = handler(&mut context).controls();

        assert!(controls[Action::Thrust]);
        assert!(controls[Action::TurnLeft]);
        assert!(!controls[Action::TurnRight]);
        assert!(!controls[Action::Reset]);
    }

    #[test]
    fn test_releasing_key_clears_action() {
        let mut context = context_with(&[KeyCode::W]);
        let mut state = context.state().clone();
        state.advance_frame();
        state.keyboard.release(KeyCode::W);
        context.update_state(state);
        context.process();

        assert!(!handler(&mut context).controls()[Action::Thrust]);
    }

    #[test]
    fn test_quit_key_raises_command_once() {
        let mut context = context_with(&[KeyCode::Q]);
        let race = handler(&mut context);

        assert_eq!(race.take_commands(), vec![RaceCommand::Quit]);
        assert!(race.take_commands().is_empty());
    }

    #[test]
    fn test_tap_inside_one_frame_is_not_lost() {
        let mut context = InputContext::new();
        context.register_handler(Box::new(RaceInputHandler::default()));

        let mut state = InputState::new();
        for key in [KeyCode::P, KeyCode::R] {
            state.keyboard.press(key);
            state.keyboard.release(key);
        }
        context.update_state(state);
        context.process();

        let race = handler(&mut context);
        assert_eq!(race.take_commands(), vec![RaceCommand::TogglePause]);
        assert!(race.controls()[Action::Reset]);
    }

    #[test]
    fn test_reset_key_is_an_action_not_a_command() {
        let mut context = context_with(&[KeyCode::R]);
        let race = handler(&mut context);

        assert!(race.controls()[Action::Reset]);
        assert!(race.take_commands().is_empty());
    }
}
