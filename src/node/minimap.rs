//! Minimap overlay.
//!
//! Pinned to the top-right corner of the viewport. It shows the whole scene
//! scaled into a small box plus an outline of the part currently visible.
//! Clicking inside records a focus request in scene coordinates; the host
//! forwards it to `SceneView::set_scene_focus_center_point_with_clamping`.

use super::{NodeFlags, NodeState, SceneNode};
use crate::constants::{DEFAULT_MINIMAP_SIZE, MINIMAP_MARGIN};
use crate::input::{CoordinateConverter, MouseButton, PointerEvent};
use crate::math::{Anchor, Rect, Size, map_rect};
use crate::surface::{Color, Painter};
use crate::view::ViewEvent;
use glam::{DAffine2, DVec2};
use std::any::Any;
use tracing::trace;

const BACKGROUND: Color = [20, 20, 20, 180];
const SCENE_COLOR: Color = [200, 200, 200, 255];
const VISIBLE_COLOR: Color = [255, 200, 0, 255];

pub struct MiniMapNode {
    state: NodeState,
    size: Size,
    scene: Rect,
    viewport: Rect,
    scene_transform: DAffine2,
    focus_request: Option<DVec2>,
}

impl MiniMapNode {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_MINIMAP_SIZE)
    }

    pub fn with_size(size: Size) -> Self {
        let flags = NodeFlags {
            selectable: true,
            ..NodeFlags::default()
        };
        Self {
            state: NodeState::new(Anchor::NorthEast, flags),
            size,
            scene: Rect::empty(),
            viewport: Rect::empty(),
            scene_transform: DAffine2::IDENTITY,
            focus_request: None,
        }
    }

    pub fn set_scene(&mut self, scene: Rect) {
        if self.scene != scene {
            self.scene = scene;
            self.state.request_update();
        }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.state.request_update();
        }
    }

    pub fn set_scene_transform(&mut self, transform: DAffine2) {
        if self.scene_transform != transform {
            self.scene_transform = transform;
            self.state.request_update();
        }
    }

    /// Track one change reported by the view.
    pub fn handle_view_event(&mut self, event: &ViewEvent) {
        match *event {
            ViewEvent::ViewPortUpdated(rect) => self.set_viewport(rect),
            ViewEvent::SceneUpdated(rect) => self.set_scene(rect),
            ViewEvent::SceneTransformationsUpdated(transform) => self.set_scene_transform(transform),
        }
    }

    /// Scene point the user clicked on, if any, since the last call.
    pub fn take_focus_request(&mut self) -> Option<DVec2> {
        self.focus_request.take()
    }

    /// Part of the scene visible through the viewport, in scene units.
    pub fn visible_area(&self) -> Option<Rect> {
        if !self.viewport.is_valid() || !self.scene.is_valid() {
            return None;
        }
        let inverse = CoordinateConverter::inverse(&self.scene_transform)?;
        map_rect(&inverse, &self.viewport).intersection(&self.scene)
    }

    /// Scene-to-minimap scale; the scene is fitted inside the box.
    fn ratio(&self) -> f64 {
        if !self.scene.is_valid() || !self.size.is_valid() {
            return 0.0;
        }
        (self.size.width / self.scene.width).min(self.size.height / self.scene.height)
    }

    fn scene_to_local(&self) -> DAffine2 {
        let origin = self.bounding_rect().min();
        DAffine2::from_translation(origin)
            * DAffine2::from_scale(DVec2::splat(self.ratio()))
            * DAffine2::from_translation(-self.scene.min())
    }
}

impl Default for MiniMapNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode for MiniMapNode {
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

    /// Box hanging left and down from the anchor corner.
    fn bounding_rect(&self) -> Rect {
        Rect::new(
            -self.size.width - MINIMAP_MARGIN,
            MINIMAP_MARGIN,
            self.size.width,
            self.size.height,
        )
    }

    fn draw(&mut self, painter: &mut dyn Painter) {
        painter.fill_rect(self.bounding_rect(), BACKGROUND);
        if self.ratio() <= 0.0 {
            return;
        }

        let to_local = self.scene_to_local();
        painter.stroke_rect(map_rect(&to_local, &self.scene), SCENE_COLOR, 1.0);
        if let Some(visible) = self.visible_area() {
            painter.stroke_rect(map_rect(&to_local, &visible), VISIBLE_COLOR, 1.0);
        }
    }

    fn mouse_press(&mut self, event: &PointerEvent) {
        if event.button != MouseButton::Left || self.ratio() <= 0.0 {
            return;
        }
        if let Some(point) = CoordinateConverter::device_to_local(event.position, &self.scene_to_local()) {
            trace!(x = point.x, y = point.y, "Minimap focus request");
            self.focus_request = Some(point);
        }
    }
}
