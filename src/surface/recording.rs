//! Surface that records draw commands instead of rasterizing them.
//!
//! Hosts with their own GPU pipeline replay the commands; tests assert on
//! them.

use super::{Color, Painter, Surface, TransformStack};
use crate::error::SurfaceError;
use crate::math::Rect;
use glam::{DAffine2, DVec2};
use image::RgbaImage;

/// One recorded painter call, with the transform that was current.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Projection(Rect),
    FillRect {
        rect: Rect,
        color: Color,
        transform: DAffine2,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f64,
        transform: DAffine2,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Color,
        width: f64,
        transform: DAffine2,
    },
    Points {
        points: Vec<DVec2>,
        size: f64,
        color: Color,
        transform: DAffine2,
    },
    Image {
        target: Rect,
        width: u32,
        height: u32,
        transform: DAffine2,
    },
}

impl DrawCommand {
    /// Transform in effect for drawing commands; `None` for state commands.
    pub fn transform(&self) -> Option<DAffine2> {
        match self {
            DrawCommand::Clear(_) | DrawCommand::Projection(_) => None,
            DrawCommand::FillRect { transform, .. }
            | DrawCommand::StrokeRect { transform, .. }
            | DrawCommand::Line { transform, .. }
            | DrawCommand::Points { transform, .. }
            | DrawCommand::Image { transform, .. } => Some(*transform),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Commands of the frame being drawn
    commands: Vec<DrawCommand>,
    /// Commands of the last presented frame
    presented: Vec<DrawCommand>,
    stack: TransformStack,
    fail_creation: bool,
    create_calls: usize,
    frames_presented: usize,
    destroyed: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose creation fails until `set_fail_creation(false)`.
    pub fn failing() -> Self {
        Self {
            fail_creation: true,
            ..Self::default()
        }
    }

    pub fn set_fail_creation(&mut self, fail: bool) {
        self.fail_creation = fail;
    }

    /// Commands of the last presented frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.presented
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Painter for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.record(DrawCommand::Clear(color));
    }

    fn set_projection(&mut self, viewport: Rect) {
        self.stack.reset(DAffine2::IDENTITY);
        self.record(DrawCommand::Projection(viewport));
    }

    fn push_transform(&mut self, transform: DAffine2) {
        self.stack.push(transform);
    }

    fn pop_transform(&mut self) {
        self.stack.pop();
    }

    fn current_transform(&self) -> DAffine2 {
        self.stack.current()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let transform = self.stack.current();
        self.record(DrawCommand::FillRect {
            rect,
            color,
            transform,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        let transform = self.stack.current();
        self.record(DrawCommand::StrokeRect {
            rect,
            color,
            width,
            transform,
        });
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Color, width: f64) {
        let transform = self.stack.current();
        self.record(DrawCommand::Line {
            from,
            to,
            color,
            width,
            transform,
        });
    }

    fn draw_points(&mut self, points: &[DVec2], size: f64, color: Color) {
        let transform = self.stack.current();
        self.record(DrawCommand::Points {
            points: points.to_vec(),
            size,
            color,
            transform,
        });
    }

    fn draw_image(&mut self, target: Rect, image: &RgbaImage) {
        let transform = self.stack.current();
        self.record(DrawCommand::Image {
            target,
            width: image.width(),
            height: image.height(),
            transform,
        });
    }
}

impl Surface for RecordingSurface {
    fn create(&mut self) -> Result<(), SurfaceError> {
        self.create_calls += 1;
        if self.fail_creation {
            return Err(SurfaceError::CreationFailed("recording surface configured to fail".into()));
        }
        self.destroyed = false;
        Ok(())
    }

    fn make_current(&mut self) -> Result<(), SurfaceError> {
        self.commands.clear();
        self.stack.reset(DAffine2::IDENTITY);
        Ok(())
    }

    fn swap_buffers(&mut self) {
        self.presented = std::mem::take(&mut self.commands);
        self.frames_presented += 1;
    }

    fn read_pixels(&mut self) -> Result<RgbaImage, SurfaceError> {
        Err(SurfaceError::ReadBack("recording surface holds no pixels".into()))
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
