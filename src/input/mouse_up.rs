//! Mouse release handling - end gestures, deliver rubber band selections.

use crate::input::coords::CoordinateConverter;
use crate::input::events::{MouseButton, PointerEvent};
use crate::input::state::{GestureState, rubber_band_rect};
use crate::math::Rect;
use crate::node::NodeArena;
use crate::profile_scope;
use crate::selection::{SelectionEvent, SelectionMode};
use crate::view::SceneView;
use tracing::debug;

impl SceneView {
    /// Handle a pointer release at a device position.
    ///
    /// Releasing the button that started the rubber band turns the band into
    /// a [`SelectionEvent`] for every rubber-bandable node.
    pub fn mouse_release(&mut self, arena: &mut NodeArena, event: &PointerEvent) {
        profile_scope!("mouse_release");

        self.dispatch_pointer(arena, event, |node, local| node.mouse_release(local));

        if self.gesture.is_panning() && event.button == MouseButton::Left {
            self.gesture.reset();
            return;
        }

        let GestureState::RubberBanding { button, origin, .. } = self.gesture else {
            return;
        };
        if button != event.button {
            return;
        }
        self.gesture.reset();

        let area = rubber_band_rect(origin, event.position);
        let mode = SelectionMode::from_modifiers(event.modifiers);
        self.deliver_selection(arena, area, mode);
        self.request_redraw();
    }

    /// Map a device-space selection rectangle into each rubber-bandable
    /// node and deliver it, clipped to the node's bounds.
    ///
    /// A node the rectangle misses receives an empty area, so it can clear
    /// its selection for mode `New`.
    pub fn deliver_selection(&self, arena: &mut NodeArena, area: Rect, mode: SelectionMode) {
        profile_scope!("deliver_selection");
        for id in &self.nodes {
            let Some(node) = arena.get_mut(*id) else {
                continue;
            };
            if !node.rubber_bandable() {
                continue;
            }
            let composed = self.node_transformations(&**node);
            let local = CoordinateConverter::rect_device_to_local(&area, &composed)
                .and_then(|rect| rect.intersection(&node.bounding_rect()))
                .unwrap_or_else(Rect::empty);

            debug!(node = ?id, ?mode, x = local.x, y = local.y, width = local.width, height = local.height, "Selection delivered");
            node.set_selection_area(&SelectionEvent::new(local, mode));
        }
    }
}
