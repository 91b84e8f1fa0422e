//! Rubber-band selection events delivered to scene nodes.

use crate::input::Modifiers;
use crate::math::Rect;

/// How a delivered selection combines with what the node already selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionMode {
    /// Replace the current selection
    #[default]
    New,
    /// Extend the current selection
    Add,
    /// Subtract from the current selection
    Remove,
}

impl SelectionMode {
    /// Shift adds, Control (or the platform key) removes, nothing replaces.
    ///
    /// Shift wins when both are held.
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.shift {
            SelectionMode::Add
        } else if modifiers.control || modifiers.platform {
            SelectionMode::Remove
        } else {
            SelectionMode::New
        }
    }
}

/// A selection region in a node's local space plus the mode to apply it with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionEvent {
    area: Rect,
    mode: SelectionMode,
}

impl SelectionEvent {
    pub fn new(area: Rect, mode: SelectionMode) -> Self {
        Self { area, mode }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// The gesture missed the node entirely
    pub fn is_empty(&self) -> bool {
        self.area.is_empty()
    }
}
