//! Gesture state machine for pointer interaction with the view.
//!
//! A single enum replaces the `panning`/`rubber_banding` flag pairs and their
//! origin points, so the two gestures cannot be active at once.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning        (left press, selection mode off)
//! Idle -> RubberBanding  (right press, or left press in selection mode)
//!
//! Panning       -> Idle  (release of the button that started it)
//! RubberBanding -> Idle  (release of the button that started it)
//! ```

use super::events::MouseButton;
use crate::math::Rect;
use glam::DVec2;

/// Current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No active gesture
    #[default]
    Idle,

    /// Dragging the scene
    Panning {
        /// Last global pointer position for delta calculation
        last_pos: DVec2,
    },

    /// Drawing a selection rectangle
    RubberBanding {
        /// Button that started the gesture; only its release ends it
        button: MouseButton,
        /// Press position in device pixels
        origin: DVec2,
        /// Latest pointer position in device pixels
        current: DVec2,
    },
}

impl GestureState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if currently panning the scene
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// Returns true if a rubber band is being drawn
    pub fn is_rubber_banding(&self) -> bool {
        matches!(self, Self::RubberBanding { .. })
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn start_panning(&mut self, global_pos: DVec2) {
        *self = Self::Panning { last_pos: global_pos };
    }

    /// Replace the last panning position, returning the movement since the
    /// previous one. `None` outside a pan.
    pub fn advance_pan(&mut self, global_pos: DVec2) -> Option<DVec2> {
        match self {
            Self::Panning { last_pos } => {
                let delta = global_pos - *last_pos;
                *last_pos = global_pos;
                Some(delta)
            }
            _ => None,
        }
    }

    pub fn start_rubber_band(&mut self, button: MouseButton, origin: DVec2) {
        *self = Self::RubberBanding {
            button,
            origin,
            current: origin,
        };
    }

    pub fn set_rubber_band_current(&mut self, pos: DVec2) {
        if let Self::RubberBanding { current, .. } = self {
            *current = pos;
        }
    }

    /// Button that started the rubber band, if one is active
    pub fn rubber_band_button(&self) -> Option<MouseButton> {
        match self {
            Self::RubberBanding { button, .. } => Some(*button),
            _ => None,
        }
    }

    /// The in-progress selection rectangle in device pixels.
    pub fn rubber_band_rect(&self) -> Option<Rect> {
        match self {
            Self::RubberBanding { origin, current, .. } => Some(rubber_band_rect(*origin, *current)),
            _ => None,
        }
    }
}

/// Selection rectangle spanned by two pointer positions.
///
/// Width and height count pixels inclusively: `|dx| + 1` by `|dy| + 1`, so a
/// click without movement still covers one pixel.
pub fn rubber_band_rect(origin: DVec2, destination: DVec2) -> Rect {
    let min = origin.min(destination);
    let extent = (origin - destination).abs() + DVec2::ONE;
    Rect::new(min.x, min.y, extent.x, extent.y)
}
