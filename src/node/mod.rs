//! # Scene Nodes
//!
//! Every drawable layer of the view (microscope image, spot layer, chip grid,
//! minimap) implements [`SceneNode`]. Nodes live in a [`NodeArena`] owned by
//! whoever created them; the view only keeps [`NodeId`]s in its render list
//! and never inserts into or removes from the arena.
//!
//! ## Update notification
//!
//! A node that changed state calls [`NodeState::request_update`]. The view
//! collects these flags once per frame from the nodes registered with it,
//! which coalesces any number of updates into a single redraw.

mod grid;
mod image_layer;
mod minimap;
mod spots;

pub use grid::GridNode;
pub use image_layer::ImageNode;
pub use minimap::MiniMapNode;
pub use spots::SpotsNode;

use crate::input::PointerEvent;
use crate::math::{Anchor, Rect};
use crate::selection::SelectionEvent;
use crate::surface::Painter;
use glam::{DAffine2, DVec2};
use slotmap::SlotMap;
use std::any::Any;

slotmap::new_key_type! {
    /// Handle to a node stored in a [`NodeArena`].
    pub struct NodeId;
}

/// Storage for nodes, owned by the page that builds the scene.
pub type NodeArena = SlotMap<NodeId, Box<dyn SceneNode>>;

/// Capability flags checked by the view before drawing or dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeFlags {
    pub visible: bool,
    /// Receives pointer press/move/release
    pub selectable: bool,
    /// Follows the view's pan/zoom/rotation
    pub transformable: bool,
    /// Receives rubber-band selection events
    pub rubber_bandable: bool,
    pub inverted_x: bool,
    pub inverted_y: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            visible: true,
            selectable: false,
            transformable: false,
            rubber_bandable: false,
            inverted_x: false,
            inverted_y: false,
        }
    }
}

/// State every node carries: placement, flags and the pending-update bit.
#[derive(Debug, Clone)]
pub struct NodeState {
    transform: DAffine2,
    anchor: Anchor,
    flags: NodeFlags,
    update_pending: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self::new(Anchor::None, NodeFlags::default())
    }
}

impl NodeState {
    pub fn new(anchor: Anchor, flags: NodeFlags) -> Self {
        Self {
            transform: DAffine2::IDENTITY,
            anchor,
            flags,
            update_pending: false,
        }
    }

    pub fn transform(&self) -> DAffine2 {
        self.transform
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn set_transform(&mut self, transform: DAffine2) {
        if self.transform != transform {
            self.transform = transform;
            self.request_update();
        }
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        if self.anchor != anchor {
            self.anchor = anchor;
            self.request_update();
        }
    }

    pub fn set_flags(&mut self, flags: NodeFlags) {
        if self.flags != flags {
            self.flags = flags;
            self.request_update();
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.set_flags(NodeFlags {
            visible,
            ..self.flags
        });
    }

    /// Ask the view for a redraw.
    pub fn request_update(&mut self) {
        self.update_pending = true;
    }

    pub fn is_update_pending(&self) -> bool {
        self.update_pending
    }

    /// Clear the pending-update bit, returning its previous value.
    pub fn take_update(&mut self) -> bool {
        std::mem::take(&mut self.update_pending)
    }
}

/// Capability contract for anything the view can draw and dispatch input to.
///
/// Implementors embed a [`NodeState`] and expose it through `state` and
/// `state_mut`; the remaining accessors have defaults built on it. Handlers
/// receive events already mapped into node-local space.
pub trait SceneNode {
    /// Get a reference to self as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get a mutable reference to self as Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn state(&self) -> &NodeState;

    fn state_mut(&mut self) -> &mut NodeState;

    /// Extent of the node in local space
    fn bounding_rect(&self) -> Rect;

    /// Emit this frame's draw commands in local coordinates.
    fn draw(&mut self, painter: &mut dyn Painter);

    fn transform(&self) -> DAffine2 {
        self.state().transform()
    }

    fn anchor(&self) -> Anchor {
        self.state().anchor()
    }

    fn visible(&self) -> bool {
        self.state().flags().visible
    }

    fn selectable(&self) -> bool {
        self.state().flags().selectable
    }

    fn transformable(&self) -> bool {
        self.state().flags().transformable
    }

    fn rubber_bandable(&self) -> bool {
        self.state().flags().rubber_bandable
    }

    fn inverted_x(&self) -> bool {
        self.state().flags().inverted_x
    }

    fn inverted_y(&self) -> bool {
        self.state().flags().inverted_y
    }

    /// Hit test in local space.
    fn contains(&self, point: DVec2) -> bool {
        self.bounding_rect().contains(point)
    }

    fn mouse_press(&mut self, _event: &PointerEvent) {}

    fn mouse_move(&mut self, _event: &PointerEvent) {}

    fn mouse_release(&mut self, _event: &PointerEvent) {}

    fn set_selection_area(&mut self, _event: &SelectionEvent) {}

    /// Consume the pending redraw request, if any.
    fn take_update(&mut self) -> bool {
        self.state_mut().take_update()
    }
}

/// The node stored under `id`, if it exists and is a `T`.
pub fn downcast_node<T: SceneNode + 'static>(arena: &NodeArena, id: NodeId) -> Option<&T> {
    arena.get(id).and_then(|node| node.as_any().downcast_ref::<T>())
}

pub fn downcast_node_mut<T: SceneNode + 'static>(arena: &mut NodeArena, id: NodeId) -> Option<&mut T> {
    arena.get_mut(id).and_then(|node| node.as_any_mut().downcast_mut::<T>())
}
