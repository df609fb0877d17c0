//! Gamepad sampling through gilrs

use gilrs::{Axis, Button, EventType, Gamepad, Gilrs};
use tracing::{debug, info, warn};

use crate::sim::vehicle::GamepadSnapshot;

/// Polls the first connected gamepad once per frame
pub struct GamepadPoller {
    gilrs: Option<Gilrs>,
    reset_held: bool,
}

impl GamepadPoller {
    /// Opens the platform gamepad backend; without one, play stays keyboard-only
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                for (id, pad) in gilrs.gamepads() {
                    info!(?id, name = pad.name(), "Gamepad available");
                }
                Some(gilrs)
            }
            Err(e) => {
                warn!(error = %e, "Gamepad support unavailable");
                None
            }
        };
        Self {
            gilrs,
            reset_held: false,
        }
    }

    /// A poller that never reports a gamepad
    pub fn disabled() -> Self {
        Self {
            gilrs: None,
            reset_held: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.gilrs.is_some()
    }

    /// Drains pending backend events and samples the first connected pad
    pub fn poll(&mut self) -> Option<GamepadSnapshot> {
        let gilrs = self.gilrs.as_mut()?;

        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::Connected => info!(id = ?event.id, "Gamepad connected"),
                EventType::Disconnected => info!(id = ?event.id, "Gamepad disconnected"),
                _ => {}
            }
        }

        let (id, pad) = gilrs.gamepads().find(|(_, pad)| pad.is_connected())?;
        let snapshot = snapshot_of(&pad);
        if self.track_reset(snapshot.reset_pressed) {
            debug!(?id, "Gamepad reset pressed");
        }
        Some(snapshot)
    }

    /// Records the reset button level; true only on the frame it goes down
    fn track_reset(&mut self, pressed: bool) -> bool {
        let went_down = pressed && !self.reset_held;
        self.reset_held = pressed;
        went_down
    }
}

impl Default for GamepadPoller {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw stick values, y-up, no dead zone applied
fn snapshot_of(pad: &Gamepad<'_>) -> GamepadSnapshot {
    GamepadSnapshot {
        left_x: pad.value(Axis::LeftStickX),
        left_y: pad.value(Axis::LeftStickY),
        right_x: pad.value(Axis::RightStickX),
        right_y: pad.value(Axis::RightStickY),
        reset_pressed: pad.is_pressed(Button::Start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_poller_reports_nothing() {
        let mut poller = GamepadPoller::disabled();
        assert!(!poller.is_enabled());
        assert_eq!(poller.poll(), None);
    }

    #[test]
    fn test_reset_reported_once_per_press() {
        let mut poller = GamepadPoller::disabled();
        assert!(poller.track_reset(true));
        assert!(!poller.track_reset(true));
        assert!(!poller.track_reset(false));
        assert!(poller.track_reset(true));
    }
}
