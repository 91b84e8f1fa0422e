//! Host-independent input events.
//!
//! The window system adapter translates its native events into these before
//! handing them to [`crate::view::SceneView`].

use glam::DVec2;

/// Pointer button that caused an event.
///
/// For move events the host reports the button currently held down, or
/// `None` when the pointer moves without a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    #[default]
    None,
}

/// Keyboard modifiers held while the event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    /// Command on macOS, Super/Windows elsewhere
    pub platform: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
        platform: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn control() -> Self {
        Self {
            control: true,
            ..Self::NONE
        }
    }
}

/// A pointer press, move or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position in the receiver's coordinate space. Device pixels when it
    /// reaches the view; node-local once forwarded to a node.
    pub position: DVec2,
    /// Position in view device pixels, never remapped
    pub window_position: DVec2,
    /// Position in screen coordinates, used for panning deltas
    pub global_position: DVec2,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event whose window and global positions coincide with `position`.
    pub fn new(position: DVec2, button: MouseButton, modifiers: Modifiers) -> Self {
        Self {
            position,
            window_position: position,
            global_position: position,
            button,
            modifiers,
        }
    }

    /// Copy of this event re-expressed at `local` for delivery to a node.
    pub fn with_local_position(&self, local: DVec2) -> Self {
        Self {
            position: local,
            ..*self
        }
    }
}

/// Keys the view reacts to. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Other,
}

/// Wheel rotation in eighths of a degree, positive away from the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta: f64,
    pub position: DVec2,
}
