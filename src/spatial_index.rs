//! Spatial Index Module
//!
//! R-tree over spot positions for the spot layer. Point picks and rubber-band
//! region queries run in O(log n + k) instead of scanning every spot.

use crate::math::Rect;
use glam::DVec2;
use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A spot position tagged with its index in the owning layer.
#[derive(Debug, Clone, Copy)]
pub struct SpotEntry {
    pub spot: usize,
    pub x: f64,
    pub y: f64,
}

impl SpotEntry {
    pub fn new(spot: usize, position: DVec2) -> Self {
        Self {
            spot,
            x: position.x,
            y: position.y,
        }
    }
}

impl RTreeObject for SpotEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for SpotEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

impl PartialEq for SpotEntry {
    fn eq(&self, other: &Self) -> bool {
        self.spot == other.spot
    }
}

/// Spatial index for spots using an R-tree.
pub struct SpotIndex {
    tree: RTree<SpotEntry>,
}

impl SpotIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index where each spot is identified by its position in `positions`.
    pub fn from_positions(positions: &[DVec2]) -> Self {
        let entries = positions
            .iter()
            .enumerate()
            .map(|(spot, position)| SpotEntry::new(spot, *position))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Spots inside `rect`, edges included, in no particular order.
    pub fn query_rect(&self, rect: &Rect) -> Vec<usize> {
        let min = rect.min();
        let max = rect.max();
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);

        self.tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.spot)
            .collect()
    }

    /// Closest spot within `radius` of `point`.
    pub fn nearest_within(&self, point: DVec2, radius: f64) -> Option<usize> {
        self.tree
            .nearest_neighbor(&[point.x, point.y])
            .filter(|entry| entry.distance_2(&[point.x, point.y]) <= radius * radius)
            .map(|entry| entry.spot)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn rebuild(&mut self, positions: &[DVec2]) {
        *self = Self::from_positions(positions);
    }
}

impl Default for SpotIndex {
    fn default() -> Self {
        Self::new()
    }
}
