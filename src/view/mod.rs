//! # Scene View
//!
//! [`SceneView`] is the controller behind the spatial view: it keeps the
//! render list of node ids, the viewport and scene rectangles and the
//! zoom/pan/rotation state, and derives from them the transform of every
//! node.
//!
//! ## Coordinate spaces
//!
//! ```text
//! node-local --node.transform()--> placed --anchor placement--> viewport --scene transform--> device
//! ```
//!
//! The last step only applies to transformable nodes. Overlays such as the
//! minimap skip it and stay pinned to their anchor.
//!
//! ## Redraws
//!
//! The view never repaints by itself. Every state change sets a pending
//! redraw flag; node updates are folded into the same flag by
//! [`SceneView::poll_updates`]. The host calls [`SceneView::take_redraw`]
//! once per turn of its event loop and renders when it returns true.
//!
//! Pointer and keyboard handlers live in [`crate::input`].

mod events;
mod render;

pub use events::ViewEvent;

use crate::constants::{MAX_ROTATION_DELTA, WHEEL_DELTA_DIVISOR};
use crate::input::{CoordinateConverter, GestureState};
use crate::math::{
    Rect, Size, anchor_placement, clamp_zoom, compose_node_transform, fill_scale, scene_transform, wrap_rotation,
};
use crate::node::{NodeArena, NodeId, SceneNode};
use crate::perf::PerfMonitor;
use crate::settings::{RotationPivot, ViewSettings};
use glam::{DAffine2, DVec2};
use slotmap::Key;
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

pub struct SceneView {
    pub(crate) nodes: Vec<NodeId>,
    pub(crate) viewport: Rect,
    pub(crate) scene: Rect,
    pub(crate) zoom: Size,
    pub(crate) pan: DVec2,
    /// Degrees, within [-360, 360]
    pub(crate) rotation: f64,
    /// Fill scale times zoom, per axis
    pub(crate) scale: DVec2,
    pub(crate) gesture: GestureState,
    /// Left button draws a rubber band instead of panning
    pub(crate) selection_mode: bool,
    pub(crate) settings: ViewSettings,
    redraw_pending: bool,
    redraw_requests: u64,
    events: VecDeque<ViewEvent>,
    pub(crate) perf: PerfMonitor,
}

impl Default for SceneView {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneView {
    pub fn new() -> Self {
        Self::with_settings(ViewSettings::default())
    }

    pub fn with_settings(settings: ViewSettings) -> Self {
        let settings = settings.sanitized();
        let zoom = clamp_zoom(Size::splat(1.0), settings.zoom_min, settings.zoom_max);
        Self {
            nodes: Vec::new(),
            viewport: Rect::empty(),
            scene: Rect::empty(),
            zoom,
            pan: DVec2::ZERO,
            rotation: 0.0,
            scale: DVec2::new(zoom.width, zoom.height),
            gesture: GestureState::default(),
            selection_mode: false,
            settings,
            redraw_pending: false,
            redraw_requests: 0,
            events: VecDeque::new(),
            perf: PerfMonitor::new(),
        }
    }

    // ------------------------------------------------------------------
    // Render list
    // ------------------------------------------------------------------

    /// Append `id` to the render list; it is drawn on top of earlier nodes.
    ///
    /// Returns false if the id is already registered.
    pub fn add_rendering_node(&mut self, id: NodeId) -> bool {
        debug_assert!(!id.is_null(), "add_rendering_node called with a null node id");
        if id.is_null() {
            return false;
        }
        if self.nodes.contains(&id) {
            warn!(node = ?id, "Node already registered with the view");
            return false;
        }
        self.nodes.push(id);
        debug!(node = ?id, count = self.nodes.len(), "Node registered");
        self.request_redraw();
        true
    }

    /// Drop `id` from the render list. The node itself is left untouched.
    pub fn remove_rendering_node(&mut self, id: NodeId) {
        if let Some(index) = self.nodes.iter().position(|n| *n == id) {
            self.nodes.remove(index);
            debug!(node = ?id, count = self.nodes.len(), "Node unregistered");
            self.request_redraw();
        }
    }

    /// Registered ids in render order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    // ------------------------------------------------------------------
    // Zoom & rotation
    // ------------------------------------------------------------------

    /// Set the zoom, clamped into the configured bounds.
    ///
    /// Nothing happens when the clamped value equals the current zoom.
    pub fn set_zoom(&mut self, requested: Size) {
        if requested.width.is_nan() || requested.height.is_nan() || requested.width <= 0.0 || requested.height <= 0.0 {
            debug!(width = requested.width, height = requested.height, "Ignoring invalid zoom request");
            return;
        }
        let zoom = clamp_zoom(requested, self.settings.zoom_min, self.settings.zoom_max);
        if zoom == self.zoom {
            return;
        }
        trace!(width = zoom.width, height = zoom.height, "Zoom changed");
        self.zoom = zoom;
        self.update_transformations();
    }

    pub fn zoom(&self) -> Size {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.settings.zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom * (1.0 / self.settings.zoom_in_factor));
    }

    /// Zoom by a wheel rotation given in eighths of a degree.
    pub fn wheel(&mut self, delta: f64) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let factor = self
            .settings
            .wheel_step
            .powf(-delta / WHEEL_DELTA_DIVISOR)
            .clamp(f64::MIN_POSITIVE, f64::MAX);
        self.set_zoom(self.zoom * factor);
    }

    /// Rotate by `delta` degrees. Deltas beyond half a turn are ignored.
    pub fn rotate(&mut self, delta: f64) {
        if !delta.is_finite() || delta.abs() > MAX_ROTATION_DELTA {
            debug!(delta, "Rotation delta out of range, ignored");
            return;
        }
        let rotation = wrap_rotation(self.rotation + delta);
        if rotation == self.rotation {
            return;
        }
        self.rotation = rotation;
        self.transformations_changed();
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn pan(&self) -> DVec2 {
        self.pan
    }

    /// Move the scene by `delta` device pixels.
    pub fn pan_by(&mut self, delta: DVec2) {
        if delta == DVec2::ZERO {
            return;
        }
        self.pan += delta;
        self.transformations_changed();
    }

    // ------------------------------------------------------------------
    // Viewport & scene
    // ------------------------------------------------------------------

    /// Replace the viewport. Degenerate rectangles are ignored.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if viewport == self.viewport || !viewport.is_valid() {
            return;
        }
        self.viewport = viewport;
        self.push_event(ViewEvent::ViewPortUpdated(viewport));
        self.update_transformations();
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Replace the scene rectangle. Degenerate rectangles are ignored.
    pub fn set_scene(&mut self, scene: Rect) {
        if scene == self.scene || !scene.is_valid() {
            return;
        }
        self.scene = scene;
        self.push_event(ViewEvent::SceneUpdated(scene));
        self.update_transformations();
    }

    pub fn scene(&self) -> Rect {
        self.scene
    }

    /// Host window resized; sizes are in logical pixels.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) {
        let ratio = if device_pixel_ratio > 0.0 { device_pixel_ratio } else { 1.0 };
        self.set_viewport(Rect::new(0.0, 0.0, width * ratio, height * ratio));
    }

    /// Per-axis scale from scene units to device pixels
    pub fn scale_factors(&self) -> DVec2 {
        self.scale
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Pan/zoom/rotate transform applied to transformable nodes.
    pub fn scene_transformations(&self) -> DAffine2 {
        scene_transform(self.rotation, self.rotation_pivot(), self.pan, self.scale)
    }

    /// Node-local to device transform for `node`.
    pub fn node_transformations(&self, node: &dyn SceneNode) -> DAffine2 {
        let placement = anchor_placement(node.anchor(), self.viewport.size(), node.inverted_x(), node.inverted_y());
        let scene = node.transformable().then(|| self.scene_transformations());
        compose_node_transform(node.transform(), placement, scene)
    }

    fn rotation_pivot(&self) -> DVec2 {
        match self.settings.rotation_pivot {
            RotationPivot::ViewportCenter => self.viewport.center(),
            RotationPivot::SceneCenter => self.pan + self.scale * self.scene.center(),
        }
    }

    // ------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------

    /// Pan so that scene point `point` sits at the viewport center.
    pub fn center_on(&mut self, point: DVec2) {
        let target = self.viewport.center();
        let pan = match self.settings.rotation_pivot {
            RotationPivot::ViewportCenter => target - self.scale * point,
            // The pivot moves with the pan, so the rotated offset from the
            // scene center has to be solved for as well.
            RotationPivot::SceneCenter => {
                let center = self.scene.center();
                let offset = DAffine2::from_angle(self.rotation.to_radians())
                    .transform_vector2(self.scale * (point - center));
                target - self.scale * center - offset
            }
        };
        if pan == self.pan {
            return;
        }
        self.pan = pan;
        self.transformations_changed();
    }

    /// Scene point currently under the viewport center.
    pub fn scene_focus_center_point(&self) -> DVec2 {
        CoordinateConverter::device_to_local(self.viewport.center(), &self.scene_transformations())
            .unwrap_or_else(|| self.scene.center())
    }

    /// Scene points that can be centered without showing anything outside
    /// the scene.
    ///
    /// On an axis where the visible extent exceeds the scene the range
    /// collapses to the scene center.
    pub fn allowed_center_points(&self) -> Rect {
        let half_visible = self.viewport.size().to_vec2() / (self.scale * 2.0);
        let (min, max) = (self.scene.min(), self.scene.max());
        let center = self.scene.center();

        let axis = |lo: f64, hi: f64, half: f64, mid: f64| {
            if hi - lo > 2.0 * half { (lo + half, hi - half) } else { (mid, mid) }
        };
        let (x0, x1) = axis(min.x, max.x, half_visible.x, center.x);
        let (y0, y1) = axis(min.y, max.y, half_visible.y, center.y);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Center on `point` after clamping it into [`Self::allowed_center_points`].
    pub fn set_scene_focus_center_point_with_clamping(&mut self, point: DVec2) {
        let allowed = self.allowed_center_points();
        self.center_on(point.clamp(allowed.min(), allowed.max()));
    }

    // ------------------------------------------------------------------
    // Modes, settings, reset
    // ------------------------------------------------------------------

    /// Make the left button draw rubber bands instead of panning.
    pub fn set_selection_mode(&mut self, enabled: bool) {
        if self.selection_mode != enabled {
            self.selection_mode = enabled;
            self.gesture.reset();
            debug!(enabled, "Selection mode changed");
        }
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Swap in new settings, re-clamping the current zoom into the new bounds.
    pub fn apply_settings(&mut self, settings: ViewSettings) {
        self.settings = settings.sanitized();
        let zoom = clamp_zoom(self.zoom, self.settings.zoom_min, self.settings.zoom_max);
        self.zoom = zoom;
        self.update_transformations();
        debug!(zoom = ?self.zoom, "View settings applied");
    }

    /// Forget every registered node and return to the initial view state.
    ///
    /// The nodes themselves stay in their arena.
    pub fn clear_data(&mut self) {
        self.nodes.clear();
        self.zoom = clamp_zoom(Size::splat(1.0), self.settings.zoom_min, self.settings.zoom_max);
        self.pan = DVec2::ZERO;
        self.rotation = 0.0;
        self.gesture.reset();
        self.update_transformations();
        debug!("View data cleared");
    }

    // ------------------------------------------------------------------
    // Redraw & notifications
    // ------------------------------------------------------------------

    /// Fold the update requests of registered nodes into the pending redraw.
    ///
    /// Nodes that are not registered keep their flag.
    pub fn poll_updates(&mut self, arena: &mut NodeArena) -> bool {
        let mut updated = false;
        for id in &self.nodes {
            if let Some(node) = arena.get_mut(*id) {
                updated |= node.take_update();
            }
        }
        if updated {
            self.request_redraw();
        }
        updated
    }

    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
        self.redraw_requests += 1;
    }

    pub fn is_redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Consume the pending redraw, returning whether there was one.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Number of redraw requests since creation, coalesced or not
    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }

    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain(..).collect()
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    /// Recompute the derived scale after zoom, viewport or scene changed.
    fn update_transformations(&mut self) {
        let fill = fill_scale(self.viewport.size(), self.scene.size());
        self.scale = DVec2::new(fill * self.zoom.width, fill * self.zoom.height);
        self.transformations_changed();
    }

    pub(crate) fn transformations_changed(&mut self) {
        let transform = self.scene_transformations();
        self.push_event(ViewEvent::SceneTransformationsUpdated(transform));
        self.request_redraw();
    }

    fn push_event(&mut self, event: ViewEvent) {
        // Only the latest transform matters to listeners
        if let (ViewEvent::SceneTransformationsUpdated(_), Some(ViewEvent::SceneTransformationsUpdated(_))) =
            (&event, self.events.back())
        {
            self.events.pop_back();
        }
        self.events.push_back(event);
    }
}
