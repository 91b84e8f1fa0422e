//! Mouse move handling - panning, rubber band tracking, node dispatch.
//!
//! ## Performance Notes
//!
//! Mouse move arrives at pointer rate. Panning and rubber band updates touch
//! a couple of fields; only node dispatch walks the render list.

use crate::input::events::{MouseButton, PointerEvent};
use crate::node::NodeArena;
use crate::profile_scope;
use crate::view::SceneView;

impl SceneView {
    /// Handle pointer movement. `event.button` is the button held, if any.
    pub fn mouse_move(&mut self, arena: &mut NodeArena, event: &PointerEvent) {
        profile_scope!("mouse_move");

        if let Some(delta) = self.gesture.advance_pan(event.global_position) {
            self.pan_by(delta * self.settings.mouse_pan_factor);
        }

        if self.gesture.rubber_band_button() == Some(event.button) {
            self.gesture.set_rubber_band_current(event.position);
            self.request_redraw();
        } else if event.button != MouseButton::None {
            self.dispatch_pointer(arena, event, |node, local| node.mouse_move(local));
        }
    }
}
