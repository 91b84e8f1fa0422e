//! Coordinate conversion between view device pixels and node-local space.
//!
//! Centralizes the inverse-transform mapping so press, move, release and
//! rubber-band delivery all agree on a node's local coordinates.

use crate::math::{Rect, map_rect};
use glam::{DAffine2, DVec2};

/// Below this determinant a node transform is treated as non-invertible.
const SINGULAR_EPSILON: f64 = 1e-12;

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Inverse of a composed node transform, if it has one.
    #[inline]
    pub fn inverse(composed: &DAffine2) -> Option<DAffine2> {
        if composed.matrix2.determinant().abs() < SINGULAR_EPSILON {
            None
        } else {
            Some(composed.inverse())
        }
    }

    /// Map a device point into the local space of a node drawn with `composed`.
    #[inline]
    pub fn device_to_local(point: DVec2, composed: &DAffine2) -> Option<DVec2> {
        Self::inverse(composed).map(|inverse| inverse.transform_point2(point))
    }

    /// Map a node-local point to device pixels
    #[inline]
    pub fn local_to_device(point: DVec2, composed: &DAffine2) -> DVec2 {
        composed.transform_point2(point)
    }

    /// Bounding box, in node-local space, of a device rectangle.
    pub fn rect_device_to_local(rect: &Rect, composed: &DAffine2) -> Option<Rect> {
        Self::inverse(composed).map(|inverse| map_rect(&inverse, rect))
    }
}
