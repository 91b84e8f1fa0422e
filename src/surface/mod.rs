//! Graphics surface abstraction.
//!
//! The view never talks to a graphics API directly. It draws through a
//! [`Painter`] obtained from a [`RenderContext`], which owns one [`Surface`],
//! creates it lazily, binds it for exactly one render pass and tears it down
//! when dropped.
//!
//! ## Context binding
//!
//! Like a GL context, a surface is current on one thread at a time. Binding
//! is scoped: [`RenderContext::begin_frame`] returns a [`CurrentFrame`] guard
//! that presents and unbinds on drop, so a failed or early-returning render
//! pass cannot leave a context bound.

mod raster;
mod recording;

pub use raster::RasterSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::error::SurfaceError;
use crate::math::Rect;
use glam::{DAffine2, DVec2};
use image::RgbaImage;
use std::cell::Cell;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};
use uuid::Uuid;

/// RGBA color, 8 bits per channel
pub type Color = [u8; 4];

/// Draw-command sink used by the view and the nodes.
///
/// Geometry is given in the coordinate space of the current top of the
/// transform stack.
pub trait Painter {
    fn clear(&mut self, color: Color);

    /// Map `viewport` (device pixels) onto the whole drawable.
    fn set_projection(&mut self, viewport: Rect);

    /// Multiply `transform` onto the current top of the stack and push it.
    fn push_transform(&mut self, transform: DAffine2);

    fn pop_transform(&mut self);

    /// Local-to-device transform currently in effect
    fn current_transform(&self) -> DAffine2;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Color, width: f64);

    /// Square points of side `size` centered on each position.
    fn draw_points(&mut self, points: &[DVec2], size: f64, color: Color);

    /// Stretch `image` over `target`.
    fn draw_image(&mut self, target: Rect, image: &RgbaImage);
}

/// A drawable with a lifecycle: creation, binding, presentation, read-back.
pub trait Surface: Painter {
    /// Allocate the backend context and drawable.
    fn create(&mut self) -> Result<(), SurfaceError>;

    /// Bind for drawing on the calling thread.
    fn make_current(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn done_current(&mut self) {}

    /// Present the frame just drawn.
    fn swap_buffers(&mut self) {}

    /// Copy of the last presented frame.
    fn read_pixels(&mut self) -> Result<RgbaImage, SurfaceError>;

    /// Release everything `create` allocated.
    fn destroy(&mut self) {}
}

thread_local! {
    static CURRENT_CONTEXT: Cell<Option<Uuid>> = const { Cell::new(None) };
}

fn bind_current(id: Uuid) -> Result<(), SurfaceError> {
    CURRENT_CONTEXT.with(|current| match current.get() {
        Some(other) if other != id => Err(SurfaceError::ContextBusy),
        _ => {
            current.set(Some(id));
            Ok(())
        }
    })
}

fn release_current(id: Uuid) {
    CURRENT_CONTEXT.with(|current| {
        if current.get() == Some(id) {
            current.set(None);
        }
    });
}

/// Owner of one surface and its lifecycle.
pub struct RenderContext<S: Surface> {
    id: Uuid,
    surface: S,
    created: bool,
}

impl<S: Surface> RenderContext<S> {
    pub fn new(surface: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            surface,
            created: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Create the surface if that has not happened yet.
    ///
    /// A failure is logged and returned; the next call tries again.
    pub fn ensure_created(&mut self) -> Result<(), SurfaceError> {
        if self.created {
            return Ok(());
        }
        match self.surface.create() {
            Ok(()) => {
                self.created = true;
                debug!(context = %self.id, "Graphics surface created");
                Ok(())
            }
            Err(e) => {
                warn!(context = %self.id, error = %e, "Graphics surface creation failed");
                Err(e)
            }
        }
    }

    /// Bind the surface for one render pass.
    pub fn begin_frame(&mut self) -> Result<CurrentFrame<'_, S>, SurfaceError> {
        self.ensure_created()?;
        bind_current(self.id)?;
        if let Err(e) = self.surface.make_current() {
            release_current(self.id);
            return Err(e);
        }
        Ok(CurrentFrame { context: self })
    }

    /// Copy of the last presented frame.
    pub fn read_pixels(&mut self) -> Result<RgbaImage, SurfaceError> {
        if !self.created {
            return Err(SurfaceError::NotCreated);
        }
        self.surface.read_pixels()
    }
}

impl<S: Surface> Drop for RenderContext<S> {
    fn drop(&mut self) {
        if self.created {
            self.surface.destroy();
            self.created = false;
            debug!(context = %self.id, "Graphics surface destroyed");
        }
        release_current(self.id);
    }
}

/// A surface bound for drawing. Presents and unbinds on drop.
pub struct CurrentFrame<'a, S: Surface> {
    context: &'a mut RenderContext<S>,
}

impl<S: Surface> Deref for CurrentFrame<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.context.surface
    }
}

impl<S: Surface> DerefMut for CurrentFrame<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.context.surface
    }
}

impl<S: Surface> Drop for CurrentFrame<'_, S> {
    fn drop(&mut self) {
        self.context.surface.swap_buffers();
        self.context.surface.done_current();
        release_current(self.context.id);
    }
}

/// Model-view stack shared by the bundled surfaces.
#[derive(Debug, Clone)]
pub struct TransformStack {
    base: DAffine2,
    stack: Vec<DAffine2>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            base: DAffine2::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Replace the projection at the bottom and drop every pushed entry.
    pub fn reset(&mut self, base: DAffine2) {
        self.base = base;
        self.stack.clear();
    }

    pub fn current(&self) -> DAffine2 {
        self.stack.last().copied().unwrap_or(self.base)
    }

    pub fn push(&mut self, transform: DAffine2) {
        let top = self.current() * transform;
        self.stack.push(top);
    }

    pub fn pop(&mut self) {
        if self.stack.pop().is_none() {
            debug!("pop_transform on an empty stack");
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
