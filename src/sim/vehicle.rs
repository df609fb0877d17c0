//! Vehicle tuning and the mapping from player intent to forces

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

/// Triangle outline in body space: nose at +y, base centered on the origin
pub const VEHICLE_OUTLINE: [[f32; 2]; 3] = [[-0.3, 0.0], [0.0, 1.0], [0.3, 0.0]];

/// Physical and control tuning for the vehicle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VehicleConfig {
    /// Torque applied while steering
    pub torque: f32,
    /// Forward force at full throttle
    pub thrust: f32,
    pub density: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Stick values below this magnitude read as zero
    pub gamepad_dead_zone: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            torque: 100.0,
            thrust: 1200.0,
            density: 200.0,
            friction: 0.1,
            linear_damping: 1.0,
            angular_damping: 1.0,
            gamepad_dead_zone: 0.01,
        }
    }
}

/// Logical player actions, independent of the physical key or button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Thrust,
    Reset,
}

/// Which actions are currently held
pub type ControlState = EnumMap<Action, bool>;

/// Analog state of the first connected gamepad, sticks y-up in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadSnapshot {
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
    pub right_y: f32,
    pub reset_pressed: bool,
}

impl GamepadSnapshot {
    /// Copy of the snapshot with small stick values zeroed
    pub fn with_dead_zone(self, dead_zone: f32) -> Self {
        let filter = |v: f32| if v.abs() < dead_zone { 0.0 } else { v };
        Self {
            left_x: filter(self.left_x),
            left_y: filter(self.left_y),
            right_x: filter(self.right_x),
            right_y: filter(self.right_y),
            reset_pressed: self.reset_pressed,
        }
    }

    /// Any stick deflected; the gamepad then overrides the keyboard
    pub fn is_active(&self) -> bool {
        [self.left_x, self.left_y, self.right_x, self.right_y]
            .iter()
            .any(|v| *v != 0.0)
    }
}

/// Forces to apply this step, plus whether to put the vehicle back on the grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlOutput {
    /// Counter-clockwise torque
    pub torque: f32,
    /// Force along the vehicle's nose
    pub thrust: f32,
    pub reset: bool,
}

/// Combines keyboard actions and an optional gamepad into forces
pub fn control_output(
    config: &VehicleConfig,
    actions: &ControlState,
    gamepad: Option<GamepadSnapshot>,
) -> ControlOutput {
    let pad = gamepad
        .map(|pad| pad.with_dead_zone(config.gamepad_dead_zone))
        .filter(GamepadSnapshot::is_active);

    let (torque, thrust) = match pad {
        Some(pad) => (
            -pad.left_x * config.torque,
            pad.right_y.max(0.0) * config.thrust,
        ),
        None => {
            let mut torque = 0.0;
            if actions[Action::TurnLeft] {
                torque += config.torque;
            }
            if actions[Action::TurnRight] {
                torque -= config.torque;
            }
            let thrust = if actions[Action::Thrust] {
                config.thrust
            } else {
                0.0
            };
            (torque, thrust)
        }
    };

    let reset = actions[Action::Reset] || gamepad.is_some_and(|pad| pad.reset_pressed);

    ControlOutput {
        torque,
        thrust,
        reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(actions: &[Action]) -> ControlState {
        let mut state = ControlState::default();
        for &action in actions {
            state[action] = true;
        }
        state
    }

    #[test]
    fn test_idle_controls_produce_no_force() {
        let out = control_output(&VehicleConfig::default(), &ControlState::default(), None);
        assert_eq!(out, ControlOutput::default());
    }

    #[test]
    fn test_keyboard_steering_and_thrust() {
        let config = VehicleConfig::default();

        let left = control_output(&config, &held(&[Action::TurnLeft, Action::Thrust]), None);
        assert_eq!(left.torque, 100.0);
        assert_eq!(left.thrust, 1200.0);

        let right = control_output(&config, &held(&[Action::TurnRight]), None);
        assert_eq!(right.torque, -100.0);
        assert_eq!(right.thrust, 0.0);

        let both = control_output(&config, &held(&[Action::TurnLeft, Action::TurnRight]), None);
        assert_eq!(both.torque, 0.0);
    }

    #[test]
    fn test_gamepad_overrides_keyboard_when_deflected() {
        let config = VehicleConfig::default();
        let pad = GamepadSnapshot {
            left_x: 0.5,
            right_y: 0.25,
            ..Default::default()
        };

        let out = control_output(&config, &held(&[Action::TurnLeft, Action::Thrust]), Some(pad));
        assert_eq!(out.torque, -50.0);
        assert_eq!(out.thrust, 300.0);
    }

    #[test]
    fn test_gamepad_never_thrusts_backwards() {
        let pad = GamepadSnapshot {
            right_y: -1.0,
            ..Default::default()
        };
        let out = control_output(&VehicleConfig::default(), &ControlState::default(), Some(pad));
        assert_eq!(out.thrust, 0.0);
    }

    #[test]
    fn test_resting_gamepad_leaves_keyboard_in_charge() {
        // Stick drift inside the dead zone
        let pad = GamepadSnapshot {
            left_x: 0.005,
            right_y: -0.009,
            ..Default::default()
        };
        let out = control_output(&VehicleConfig::default(), &held(&[Action::Thrust]), Some(pad));
        assert_eq!(out.thrust, 1200.0);
        assert_eq!(out.torque, 0.0);
    }

    #[test]
    fn test_reset_from_key_or_button() {
        let config = VehicleConfig::default();
        assert!(control_output(&config, &held(&[Action::Reset]), None).reset);

        let pad = GamepadSnapshot {
            reset_pressed: true,
            ..Default::default()
        };
        assert!(control_output(&config, &ControlState::default(), Some(pad)).reset);
    }
}
