//! Input event routing and distribution

use super::events::InputEvent;
use super::handler::InputHandler;
use super::state::InputState;

/// Central input routing and distribution system
pub struct InputContext {
    /// Registered input handlers, sorted by priority (highest first)
    handlers: Vec<Box<dyn InputHandler>>,
    state: InputState,
    /// Debug: Events generated last frame
    last_events: Vec<String>,
}

impl InputContext {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            state: InputState::new(),
            last_events: Vec::new(),
        }
    }

    /// Register an input handler
    ///
    /// Handlers are automatically sorted by priority (highest first).
    pub fn register_handler(&mut self, handler: Box<dyn InputHandler>) {
        self.handlers.push(handler);
        self.handlers
            .sort_by_key(|h| std::cmp::Reverse(h.priority()));
    }

    /// Update input state from collector
    pub fn update_state(&mut self, state: InputState) {
        self.state = state;
    }

    /// Process input and dispatch events to handlers
    ///
    /// Call this once per frame after updating state.
    pub fn process(&mut self) {
        self.last_events.clear();

        for handler in &mut self.handlers {
            handler.begin_frame();
        }

        let events = self.generate_events();
        for event in &events {
            self.last_events.push(format!("{:?}", event));
        }

        for event in events {
            for handler in &mut self.handlers {
                if handler.handle_event(&event, &self.state) {
                    // Event consumed, stop propagation
                    break;
                }
            }
        }

        for handler in &mut self.handlers {
            handler.update(&self.state);
        }
    }

    /// Key edges of this frame, in key order so dispatch is deterministic
    fn generate_events(&self) -> Vec<InputEvent> {
        let mut keys: Vec<_> = self.state.keyboard.keys.iter().collect();
        keys.sort_by_key(|(key, _)| **key);

        let mut events = Vec::new();
        for (&key, state) in keys {
            // A tap carries both edges; the press goes first
            if state.is_just_pressed() {
                events.push(InputEvent::KeyPress {
                    key,
                    modifiers: self.state.keyboard.modifiers,
                });
            }
            if state.is_just_released() {
                events.push(InputEvent::KeyRelease { key });
            }
        }
        events
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Get a mutable reference to a handler by name
    pub fn get_handler_mut(&mut self, name: &str) -> Option<&mut (dyn InputHandler + '_)> {
        if let Some(boxed) = self.handlers.iter_mut().find(|h| h.name() == name) {
            Some(boxed.as_mut())
        } else {
            None
        }
    }

    /// Typed access to a registered handler
    pub fn handler_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.get_handler_mut(name)
            .and_then(|h| h.as_any_mut().downcast_mut::<T>())
    }

    /// Get debug information about all handlers
    pub fn debug_handlers(&self) -> Vec<(String, u32)> {
        self.handlers
            .iter()
            .map(|h| (h.name().to_string(), h.priority()))
            .collect()
    }

    /// Get events generated last frame (for debugging)
    pub fn debug_last_events(&self) -> &[String] {
        &self.last_events
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::app::input::KeyCode;

    struct Recorder {
        name: &'static str,
        priority: u32,
        consume: bool,
        seen: Vec<String>,
        updates: u32,
    }

    impl Recorder {
        fn new(name: &'static str, priority: u32, consume: bool) -> Self {
            Self {
                name,
                priority,
                consume,
                seen: Vec::new(),
                updates: 0,
            }
        }
    }

    impl InputHandler for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn priority(&self) -> u32 {
            self.priority
        }

        fn handle_event(&mut self, event: &InputEvent, _state: &InputState) -> bool {
            self.seen.push(format!("{:?}", event));
            self.consume
        }

        fn update(&mut self, _state: &InputState) {
            self.updates += 1;
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn pressed(keys: &[KeyCode]) -> InputState {
        let mut state = InputState::new();
        for &key in keys {
            state.keyboard.press(key);
        }
        state
    }

    #[test]
    fn test_handlers_sorted_by_priority() {
        let mut context = InputContext::new();
        context.register_handler(Box::new(Recorder::new("low", 10, false)));
        context.register_handler(Box::new(Recorder::new("high", 200, false)));

        let names: Vec<_> = context.debug_handlers().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["high", "low"]);
    }

    #[test]
    fn test_consumed_event_stops_propagation() {
        let mut context = InputContext::new();
        context.register_handler(Box::new(Recorder::new("low", 10, false)));
        context.register_handler(Box::new(Recorder::new("high", 200, true)));

        context.update_state(pressed(&[KeyCode::Q]));
        context.process();

        let high = context.handler_typed_mut::<Recorder>("high").unwrap();
        assert_eq!(high.seen.len(), 1);
        assert_eq!(high.updates, 1);
        let low = context.handler_typed_mut::<Recorder>("low").unwrap();
        assert!(low.seen.is_empty());
        assert_eq!(low.updates, 1);
    }

    #[test]
    fn test_held_keys_generate_no_events() {
        let mut context = InputContext::new();
        let mut state = pressed(&[KeyCode::W]);
        state.advance_frame();

        context.update_state(state);
        context.process();
        assert!(context.debug_last_events().is_empty());
    }

    #[test]
    fn test_press_and_release_events() {
        let mut context = InputContext::new();
        let mut state = pressed(&[KeyCode::A]);
        state.advance_frame();
        state.keyboard.release(KeyCode::A);
        state.keyboard.press(KeyCode::R);

        context.update_state(state);
        context.process();

        let events = context.debug_last_events();
        assert_eq!(events.len(), 2);
        assert!(events[0].contains("KeyRelease"));
        assert!(events[1].contains("KeyPress"));
    }

    #[test]
    fn test_tap_emits_press_then_release() {
        let mut context = InputContext::new();
        context.register_handler(Box::new(Recorder::new("recorder", 10, false)));
        let mut state = pressed(&[KeyCode::P]);
        state.keyboard.release(KeyCode::P);

        context.update_state(state);
        context.process();

        let recorder = context.handler_typed_mut::<Recorder>("recorder").unwrap();
        assert_eq!(recorder.seen.len(), 2);
        assert!(recorder.seen[0].contains("KeyPress"));
        assert!(recorder.seen[1].contains("KeyRelease"));
    }
}
