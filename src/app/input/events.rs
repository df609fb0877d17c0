//! Semantic input events

use super::state::Modifiers;

/// Semantic input events generated from raw state changes
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key went down this frame
    KeyPress { key: KeyCode, modifiers: Modifiers },

    /// Key went up this frame
    KeyRelease { key: KeyCode },
}

/// Keys the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    Space,
    Enter,
    Escape,
    Backquote,

    A,
    D,
    P,
    Q,
    R,
    S,
    W,

    Left,
    Right,
    Up,
    Down,

    Other,
}

/// Convert from winit key code
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as WK;
        match key {
            WK::Space => Self::Space,
            WK::Enter => Self::Enter,
            WK::Escape => Self::Escape,
            WK::Backquote => Self::Backquote,

            WK::KeyA => Self::A,
            WK::KeyD => Self::D,
            WK::KeyP => Self::P,
            WK::KeyQ => Self::Q,
            WK::KeyR => Self::R,
            WK::KeyS => Self::S,
            WK::KeyW => Self::W,

            WK::ArrowLeft => Self::Left,
            WK::ArrowRight => Self::Right,
            WK::ArrowUp => Self::Up,
            WK::ArrowDown => Self::Down,

            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winit_key_conversion() {
        assert_eq!(KeyCode::from(winit::keyboard::KeyCode::KeyW), KeyCode::W);
        assert_eq!(KeyCode::from(winit::keyboard::KeyCode::ArrowLeft), KeyCode::Left);
        assert_eq!(KeyCode::from(winit::keyboard::KeyCode::F7), KeyCode::Other);
    }
}
