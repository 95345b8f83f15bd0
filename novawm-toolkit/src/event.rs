//! Input event records dispatched through the element tree.
//!
//! Raw button presses and releases arrive at the [`crate::root::Root`] as
//! [`RawButtonEvent`]s and are translated into [`ButtonEvent`]s: a press
//! becomes [`ButtonKind::Down`], a release becomes [`ButtonKind::Up`] followed
//! by a synthetic [`ButtonKind::Click`]. Double-click and drag detection are
//! not provided.

use bitflags::bitflags;
use novawm_core::types::Orientation;

/// Linux input event codes for the mouse buttons the toolkit interprets.
pub const BTN_LEFT: u32 = 0x110;
pub const BTN_RIGHT: u32 = 0x111;
pub const BTN_MIDDLE: u32 = 0x112;

/// Hardware state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A button event as delivered by the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawButtonEvent {
    pub button: u32,
    pub state: ButtonState,
    pub time_msec: u32,
}

impl RawButtonEvent {
    pub fn pressed(button: u32, time_msec: u32) -> Self {
        RawButtonEvent {
            button,
            state: ButtonState::Pressed,
            time_msec,
        }
    }

    pub fn released(button: u32, time_msec: u32) -> Self {
        RawButtonEvent {
            button,
            state: ButtonState::Released,
            time_msec,
        }
    }
}

/// Kind of a translated button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Down,
    Up,
    /// Synthesized right after `Up`.
    Click,
}

/// A translated button event, as seen by elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: u32,
    pub kind: ButtonKind,
    pub time_msec: u32,
}

impl ButtonEvent {
    pub fn new(button: u32, kind: ButtonKind, time_msec: u32) -> Self {
        ButtonEvent {
            button,
            kind,
            time_msec,
        }
    }
}

/// Source of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    Wheel,
    Finger,
    Continuous,
    WheelTilt,
}

/// A scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEvent {
    pub orientation: Orientation,
    pub source: AxisSource,
    pub delta: f64,
    pub delta_discrete: i32,
    pub time_msec: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

bitflags! {
    /// Keyboard modifier mask, bit-compatible with the XKB modifier indices.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const CAPS = 1 << 1;
        const CTRL = 1 << 2;
        const ALT = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const LOGO = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub keycode: u32,
    pub keysym: u32,
    pub state: KeyState,
    pub modifiers: Modifiers,
    pub time_msec: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_button_constructors() {
        let down = RawButtonEvent::pressed(BTN_LEFT, 10);
        assert_eq!(down.state, ButtonState::Pressed);
        let up = RawButtonEvent::released(BTN_RIGHT, 11);
        assert_eq!(up.state, ButtonState::Released);
        assert_eq!(up.button, BTN_RIGHT);
    }

    #[test]
    fn test_modifier_bits() {
        let mods = Modifiers::CTRL | Modifiers::LOGO;
        assert!(mods.contains(Modifiers::CTRL));
        assert!(!mods.contains(Modifiers::ALT));
        assert_eq!(mods.bits(), 0b0100_0100);
    }
}
