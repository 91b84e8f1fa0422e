//! Microscope image layer.

use super::{NodeFlags, NodeState, SceneNode};
use crate::math::{Anchor, Rect};
use crate::surface::Painter;
use image::RgbaImage;
use std::any::Any;

/// Draws a tissue image with its top-left corner at the scene origin, one
/// scene unit per pixel.
pub struct ImageNode {
    state: NodeState,
    image: Option<RgbaImage>,
}

impl ImageNode {
    pub fn new() -> Self {
        let flags = NodeFlags {
            transformable: true,
            ..NodeFlags::default()
        };
        Self {
            state: NodeState::new(Anchor::None, flags),
            image: None,
        }
    }

    pub fn with_image(image: RgbaImage) -> Self {
        let mut node = Self::new();
        node.set_image(image);
        node
    }

    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = Some(image);
        self.state.request_update();
    }

    /// Drop the image; the node keeps drawing nothing until a new one is set.
    pub fn clear_image(&mut self) {
        if self.image.take().is_some() {
            self.state.request_update();
        }
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }
}

impl Default for ImageNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode for ImageNode {
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
        match &self.image {
            Some(image) => Rect::new(0.0, 0.0, image.width() as f64, image.height() as f64),
            None => Rect::empty(),
        }
    }

    fn draw(&mut self, painter: &mut dyn Painter) {
        if let Some(image) = &self.image {
            painter.draw_image(self.bounding_rect(), image);
        }
    }
}
