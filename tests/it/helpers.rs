//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSceneBuilder` - Builder pattern for a view with registered nodes
//! - `RecordingNode` - A node that records every event it receives
//! - Pointer event shorthands like `press()` and `rubber_band()`

#![allow(dead_code)]

use glam::{DAffine2, DVec2};
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use stview::input::{Modifiers, MouseButton, PointerEvent};
use stview::math::{Anchor, Rect, Size};
use stview::node::{NodeArena, NodeFlags, NodeId, NodeState, SceneNode};
use stview::selection::SelectionEvent;
use stview::surface::Painter;
use stview::SceneView;

// ============================================================================
// RecordingNode - records what the view delivers
// ============================================================================

/// Something a recording node received, positions already in its local space.
#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    Press(DVec2),
    Move(DVec2),
    Release(DVec2),
    Selection(SelectionEvent),
    Draw(DAffine2),
}

pub type Log = Rc<RefCell<Vec<Received>>>;

pub struct RecordingNode {
    state: NodeState,
    bounds: Rect,
    log: Log,
}

impl RecordingNode {
    pub fn new(bounds: Rect, anchor: Anchor, flags: NodeFlags, log: &Log) -> Self {
        Self {
            state: NodeState::new(anchor, flags),
            bounds,
            log: Rc::clone(log),
        }
    }

    /// Selectable, rubber-bandable, transformable recording node
    pub fn interactive(bounds: Rect, log: &Log) -> Self {
        let flags = NodeFlags {
            selectable: true,
            rubber_bandable: true,
            transformable: true,
            ..NodeFlags::default()
        };
        Self::new(bounds, Anchor::None, flags, log)
    }
}

impl SceneNode for RecordingNode {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn bounding_rect(&self) -> Rect {
        self.bounds
    }

    fn draw(&mut self, painter: &mut dyn Painter) {
        self.log.borrow_mut().push(Received::Draw(painter.current_transform()));
        painter.fill_rect(self.bounds, [255, 255, 255, 255]);
    }

    fn mouse_press(&mut self, event: &PointerEvent) {
        self.log.borrow_mut().push(Received::Press(event.position));
        self.state.request_update();
    }

    fn mouse_move(&mut self, event: &PointerEvent) {
        self.log.borrow_mut().push(Received::Move(event.position));
    }

    fn mouse_release(&mut self, event: &PointerEvent) {
        self.log.borrow_mut().push(Received::Release(event.position));
    }

    fn set_selection_area(&mut self, event: &SelectionEvent) {
        self.log.borrow_mut().push(Received::Selection(*event));
    }
}

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

// ============================================================================
// TestSceneBuilder - Builder pattern for creating test scenes
// ============================================================================

/// Builder for a view plus an arena of registered nodes.
///
/// # Example
/// ```ignore
/// let (mut view, mut arena, ids) = TestSceneBuilder::new()
///     .with_viewport(800.0, 600.0)
///     .with_scene(400.0, 300.0)
///     .with_zoom(2.0)
///     .with_node(Box::new(GridNode::new(chip, 4, 4)))
///     .build();
/// ```
pub struct TestSceneBuilder {
    viewport: Rect,
    scene: Rect,
    zoom: Option<f64>,
    nodes: Vec<Box<dyn SceneNode>>,
}

impl Default for TestSceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSceneBuilder {
    /// 800x600 viewport showing an 800x600 scene.
    pub fn new() -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
            scene: Rect::new(0.0, 0.0, 800.0, 600.0),
            zoom: None,
            nodes: Vec::new(),
        }
    }

    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self
    }

    pub fn with_scene(mut self, width: f64, height: f64) -> Self {
        self.scene = Rect::new(0.0, 0.0, width, height);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_node(mut self, node: Box<dyn SceneNode>) -> Self {
        self.nodes.push(node);
        self
    }

    /// Build the scene; the returned ids are in registration order.
    ///
    /// Pending redraws and view events from setup are cleared.
    pub fn build(self) -> (SceneView, NodeArena, Vec<NodeId>) {
        let mut view = SceneView::new();
        view.set_viewport(self.viewport);
        view.set_scene(self.scene);
        if let Some(zoom) = self.zoom {
            view.set_zoom(Size::splat(zoom));
        }

        let mut arena = NodeArena::with_key();
        let ids: Vec<NodeId> = self
            .nodes
            .into_iter()
            .map(|node| {
                let id = arena.insert(node);
                view.add_rendering_node(id);
                id
            })
            .collect();

        view.poll_updates(&mut arena);
        view.take_redraw();
        view.drain_events();
        (view, arena, ids)
    }
}

// ============================================================================
// Pointer shorthands
// ============================================================================

pub fn press(view: &mut SceneView, arena: &mut NodeArena, at: (f64, f64), button: MouseButton) {
    view.mouse_press(arena, &PointerEvent::new(DVec2::new(at.0, at.1), button, Modifiers::NONE));
}

pub fn release(view: &mut SceneView, arena: &mut NodeArena, at: (f64, f64), button: MouseButton) {
    view.mouse_release(arena, &PointerEvent::new(DVec2::new(at.0, at.1), button, Modifiers::NONE));
}

/// Right-button drag from `from` to `to`, released with `modifiers` held.
pub fn rubber_band(view: &mut SceneView, arena: &mut NodeArena, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
    let from = DVec2::new(from.0, from.1);
    let to = DVec2::new(to.0, to.1);
    view.mouse_press(arena, &PointerEvent::new(from, MouseButton::Right, Modifiers::NONE));
    view.mouse_move(arena, &PointerEvent::new(to, MouseButton::Right, Modifiers::NONE));
    view.mouse_release(arena, &PointerEvent::new(to, MouseButton::Right, modifiers));
}

pub fn approx_eq(a: DVec2, b: DVec2) -> bool {
    (a - b).length() < 1e-6
}
