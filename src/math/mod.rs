//! Geometry and transform math.
//!
//! Pure functions and value types only; nothing here knows about nodes,
//! input or surfaces.

mod geometry;
mod transform;

pub use geometry::{Rect, Size, map_rect};
pub use transform::{
    Anchor, anchor_placement, clamp_zoom, compose_node_transform, fill_scale, scene_transform,
    wrap_rotation,
};
