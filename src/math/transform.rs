//! Transform math for the scene view.
//!
//! Composition uses column vectors: "apply `a`, then `b`" is `b * a`.
//! A node drawn by the view goes through, in order:
//!
//! ```text
//! node.transform()  ->  anchor placement (mirror, then translate)  ->  scene transform
//! ```
//!
//! where the scene transform only applies to transformable nodes and is
//! itself `scale -> translate(pan) -> rotate(around pivot)`.

use super::geometry::Size;
use crate::constants::ROTATION_RANGE;
use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// Reference point in the viewport where a node's local origin is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Anchor {
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    #[default]
    None,
}

impl Anchor {
    /// Offset of the anchor point from the viewport's top-left corner.
    pub fn offset(self, viewport: Size) -> DVec2 {
        let (w, h) = (viewport.width, viewport.height);
        match self {
            Anchor::Center => DVec2::new(w * 0.5, h * 0.5),
            Anchor::North => DVec2::new(w * 0.5, 0.0),
            Anchor::NorthEast => DVec2::new(w, 0.0),
            Anchor::East => DVec2::new(w, h * 0.5),
            Anchor::SouthEast => DVec2::new(w, h),
            Anchor::South => DVec2::new(w * 0.5, h),
            Anchor::SouthWest => DVec2::new(0.0, h),
            Anchor::West => DVec2::new(0.0, h * 0.5),
            Anchor::NorthWest | Anchor::None => DVec2::ZERO,
        }
    }
}

/// Clamp a two-axis zoom into `[min, max]`, keeping the requested aspect ratio.
///
/// When one axis leaves the range the whole request is scaled, so both axes
/// move together. Only when the bounds themselves cannot hold the requested
/// ratio does the final per-axis clamp break it. An infinite axis saturates
/// at `max`; NaN or non-positive requests collapse to `min`.
pub fn clamp_zoom(requested: Size, min: Size, max: Size) -> Size {
    if requested.width.is_nan() || requested.height.is_nan() {
        return min;
    }
    let mut zoom = Size::new(requested.width.min(max.width), requested.height.min(max.height));
    if !zoom.is_valid() {
        return min;
    }

    let down = (max.width / zoom.width).min(max.height / zoom.height);
    if down < 1.0 {
        zoom = zoom * down;
    }

    let up = (min.width / zoom.width).max(min.height / zoom.height);
    if up > 1.0 {
        zoom = zoom * up;
    }

    Size::new(
        zoom.width.clamp(min.width, max.width),
        zoom.height.clamp(min.height, max.height),
    )
}

/// Fold an angle in degrees back into `[-360, 360]` by wraparound.
pub fn wrap_rotation(angle: f64) -> f64 {
    if angle > ROTATION_RANGE || angle < -ROTATION_RANGE {
        angle % ROTATION_RANGE
    } else {
        angle
    }
}

/// Uniform scale that makes `scene` cover `view` on both axes.
///
/// Returns 1.0 when either size is degenerate.
pub fn fill_scale(view: Size, scene: Size) -> f64 {
    if !view.is_valid() || !scene.is_valid() {
        return 1.0;
    }
    (view.width / scene.width).max(view.height / scene.height)
}

/// Anchor translation plus the optional axis mirroring of a node.
pub fn anchor_placement(anchor: Anchor, viewport: Size, inverted_x: bool, inverted_y: bool) -> DAffine2 {
    let translate = DAffine2::from_translation(anchor.offset(viewport));
    if inverted_x || inverted_y {
        let mirror = DVec2::new(
            if inverted_x { -1.0 } else { 1.0 },
            if inverted_y { -1.0 } else { 1.0 },
        );
        translate * DAffine2::from_scale(mirror)
    } else {
        translate
    }
}

/// The global pan/zoom/rotate transform applied to transformable nodes.
pub fn scene_transform(rotation_deg: f64, pivot: DVec2, pan: DVec2, scale: DVec2) -> DAffine2 {
    let mut transform = DAffine2::from_scale(scale);
    if pan != DVec2::ZERO {
        transform = DAffine2::from_translation(pan) * transform;
    }
    if rotation_deg != 0.0 {
        let rotate = DAffine2::from_translation(pivot)
            * DAffine2::from_angle(rotation_deg.to_radians())
            * DAffine2::from_translation(-pivot);
        transform = rotate * transform;
    }
    transform
}

/// Full node-local to device transform.
pub fn compose_node_transform(local: DAffine2, placement: DAffine2, scene: Option<DAffine2>) -> DAffine2 {
    let placed = placement * local;
    match scene {
        Some(scene) => scene * placed,
        None => placed,
    }
}
