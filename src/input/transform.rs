//! View transformations from input - keyboard panning, wheel zoom, and
//! mapping pointer events into node-local space.

use crate::input::coords::CoordinateConverter;
use crate::input::events::{Key, PointerEvent, WheelEvent};
use crate::node::{NodeArena, SceneNode};
use crate::profile_scope;
use crate::view::SceneView;
use glam::DVec2;

impl SceneView {
    /// Map a device point into `node`'s local space.
    ///
    /// `None` when the node's transform is singular (zero zoom or scale).
    pub fn device_to_node(&self, node: &dyn SceneNode, point: DVec2) -> Option<DVec2> {
        CoordinateConverter::device_to_local(point, &self.node_transformations(node))
    }

    /// Arrow keys pan by the configured step; other keys are ignored.
    pub fn key_press(&mut self, key: Key) {
        let step = self.settings.key_pan_step;
        let delta = match key {
            Key::Right => DVec2::new(step, 0.0),
            Key::Left => DVec2::new(-step, 0.0),
            Key::Up => DVec2::new(0.0, -step),
            Key::Down => DVec2::new(0.0, step),
            Key::Other => return,
        };
        self.pan_by(delta);
    }

    pub fn wheel_event(&mut self, event: &WheelEvent) {
        self.wheel(event.delta);
    }

    /// Send `event` to every visible, selectable node that the pointer hits,
    /// in render order, each getting the position in its own local space.
    pub(crate) fn dispatch_pointer(
        &self,
        arena: &mut NodeArena,
        event: &PointerEvent,
        mut deliver: impl FnMut(&mut dyn SceneNode, &PointerEvent),
    ) -> usize {
        profile_scope!("dispatch_pointer");
        let mut delivered = 0;
        for id in &self.nodes {
            let Some(node) = arena.get_mut(*id) else {
                continue;
            };
            if !node.visible() || !node.selectable() {
                continue;
            }
            let Some(local) = self.device_to_node(&**node, event.position) else {
                continue;
            };
            if node.contains(local) {
                deliver(&mut **node, &event.with_local_position(local));
                delivered += 1;
            }
        }
        delivered
    }
}
