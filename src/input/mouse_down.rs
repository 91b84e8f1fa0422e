//! Mouse press handling - node dispatch and gesture start.
//!
//! ## Performance Notes
//!
//! Every press is hit-tested against each registered node by mapping the
//! point through the inverse of the node's composed transform. Enable
//! profiling with `cargo build --features profiling` to see timing.

use crate::input::events::{MouseButton, PointerEvent};
use crate::node::NodeArena;
use crate::profile_scope;
use crate::view::SceneView;
use tracing::trace;

impl SceneView {
    /// Handle a pointer press at a device position.
    ///
    /// The press goes to every node it hits. Independently, an idle view
    /// starts panning (left button) or a rubber band (right button, or left
    /// in selection mode). A press while a gesture is running only reaches
    /// the nodes.
    pub fn mouse_press(&mut self, arena: &mut NodeArena, event: &PointerEvent) {
        profile_scope!("mouse_press");

        let hits = self.dispatch_pointer(arena, event, |node, local| node.mouse_press(local));
        trace!(button = ?event.button, hits, "Mouse press");

        if !self.gesture.is_idle() {
            return;
        }
        match event.button {
            MouseButton::Left if !self.selection_mode => {
                self.gesture.start_panning(event.global_position);
            }
            MouseButton::Left | MouseButton::Right => {
                self.gesture.start_rubber_band(event.button, event.position);
                self.request_redraw();
            }
            MouseButton::Middle | MouseButton::None => {}
        }
    }
}
