//! Plain geometry value types shared by the view, the nodes and the surfaces.

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A width/height pair. Also used for the two-axis zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same factor on both axes
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value)
    }

    /// Both dimensions strictly positive and finite
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

impl Mul<f64> for Size {
    type Output = Size;

    fn mul(self, rhs: f64) -> Size {
        Size::new(self.width * rhs, self.height * rhs)
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Smallest rectangle spanning both corners, whatever their order.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// The empty rectangle delivered to nodes when a selection misses them.
    pub const fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Well-formed: strictly positive, finite extent
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.size().is_valid() && self.x.is_finite() && self.y.is_finite()
    }

    /// No area on at least one axis
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn max(&self) -> DVec2 {
        DVec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn corners(&self) -> [DVec2; 4] {
        let (min, max) = (self.min(), self.max());
        [
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ]
    }

    /// Inclusive on all edges.
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        let max = self.max();
        point.x >= self.x && point.x <= max.x && point.y >= self.y && point.y <= max.y
    }

    /// True when `other` lies completely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.contains(other.min())
            && self.contains(other.max())
    }

    /// Overlapping region, or `None` when the rectangles do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min().max(other.min());
        let max = self.max().min(other.max());
        if max.x > min.x && max.y > min.y {
            Some(Rect::from_corners(min, max))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    pub fn translated(&self, delta: DVec2) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }
}

/// Bounding box of the four mapped corners of `rect`.
pub fn map_rect(transform: &DAffine2, rect: &Rect) -> Rect {
    let corners = rect.corners().map(|c| transform.transform_point2(c));
    let (mut min, mut max) = (corners[0], corners[0]);
    for corner in &corners[1..] {
        min = min.min(*corner);
        max = max.max(*corner);
    }
    Rect::from_corners(min, max)
}
