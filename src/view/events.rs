//! Notifications the view queues for overlays such as the minimap.

use crate::math::Rect;
use glam::DAffine2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    /// The viewport rectangle changed (device pixels)
    ViewPortUpdated(Rect),
    /// The scene rectangle changed (scene units)
    SceneUpdated(Rect),
    /// Pan, zoom, rotation or derived scale changed
    SceneTransformationsUpdated(DAffine2),
}
