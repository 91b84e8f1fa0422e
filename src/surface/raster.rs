//! Software rasterizer over an `image::RgbaImage`.
//!
//! Used for headless snapshots and pixel read-back. Shapes are filled by
//! mapping each candidate pixel center back into local space, so any affine
//! transform (rotation included) rasterizes correctly.

use super::{Color, Painter, Surface, TransformStack};
use crate::error::SurfaceError;
use crate::input::CoordinateConverter;
use crate::math::{Rect, map_rect};
use crate::profile_scope;
use glam::{DAffine2, DVec2};
use image::{Rgba, RgbaImage};

pub struct RasterSurface {
    width: u32,
    height: u32,
    back: Option<RgbaImage>,
    front: Option<RgbaImage>,
    stack: TransformStack,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            back: None,
            front: None,
            stack: TransformStack::new(),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Change the drawable size; reallocates if already created.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if self.back.is_some() {
            self.back = Some(RgbaImage::new(width, height));
            self.front = None;
        }
    }

    /// Device-space pixel range covered by `local` under the current transform.
    fn pixel_bounds(&self, local: &Rect, transform: &DAffine2) -> Option<(u32, u32, u32, u32)> {
        let device = map_rect(transform, local);
        let x0 = device.x.floor().max(0.0);
        let y0 = device.y.floor().max(0.0);
        let x1 = device.max().x.ceil().min(self.width as f64);
        let y1 = device.max().y.ceil().min(self.height as f64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Blend `color` into every pixel whose center maps inside `local`.
    fn fill_local(&mut self, local: Rect, color: Color) {
        let transform = self.stack.current();
        let Some(inverse) = CoordinateConverter::inverse(&transform) else {
            return;
        };
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(&local, &transform) else {
            return;
        };
        let Some(canvas) = self.back.as_mut() else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let center = DVec2::new(px as f64 + 0.5, py as f64 + 0.5);
                if local.contains(inverse.transform_point2(center)) {
                    blend(canvas.get_pixel_mut(px, py), color);
                }
            }
        }
    }

    /// Fill a device-space square, clipped to the canvas.
    fn fill_device_square(&mut self, center: DVec2, side: f64, color: Color) {
        let Some(canvas) = self.back.as_mut() else {
            return;
        };
        let half = (side * 0.5).max(0.5);
        let x0 = (center.x - half).floor().max(0.0) as i64;
        let y0 = (center.y - half).floor().max(0.0) as i64;
        let x1 = ((center.x + half).ceil() as i64).min(self.width as i64);
        let y1 = ((center.y + half).ceil() as i64).min(self.height as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                blend(canvas.get_pixel_mut(px as u32, py as u32), color);
            }
        }
    }
}

/// Average axis scale of a transform, for sizes given in local units.
fn uniform_scale(transform: &DAffine2) -> f64 {
    (transform.matrix2.x_axis.length() + transform.matrix2.y_axis.length()) * 0.5
}

/// Liang-Barsky clip of the segment `start..end` to the box `[min, max]`.
///
/// `None` when the segment misses the box or an endpoint is not finite.
fn clip_segment(start: DVec2, end: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let delta = end - start;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-delta.x, start.x - min.x),
        (delta.x, max.x - start.x),
        (-delta.y, start.y - min.y),
        (delta.y, max.y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((start + delta * t0, start + delta * t1))
}

/// Source-over alpha blending.
fn blend(dst: &mut Rgba<u8>, src: Color) {
    let alpha = src[3] as u32;
    if alpha == 255 {
        *dst = Rgba(src);
        return;
    }
    let inv = 255 - alpha;
    for channel in 0..3 {
        dst.0[channel] = ((src[channel] as u32 * alpha + dst.0[channel] as u32 * inv) / 255) as u8;
    }
    dst.0[3] = (alpha + dst.0[3] as u32 * inv / 255).min(255) as u8;
}

impl Painter for RasterSurface {
    fn clear(&mut self, color: Color) {
        if let Some(canvas) = self.back.as_mut() {
            for pixel in canvas.pixels_mut() {
                *pixel = Rgba(color);
            }
        }
    }

    fn set_projection(&mut self, viewport: Rect) {
        let projection = if viewport.is_valid() {
            DAffine2::from_scale(DVec2::new(
                self.width as f64 / viewport.width,
                self.height as f64 / viewport.height,
            )) * DAffine2::from_translation(-viewport.min())
        } else {
            DAffine2::IDENTITY
        };
        self.stack.reset(projection);
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
        profile_scope!("raster_fill_rect");
        self.fill_local(rect, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        let [a, b, c, d] = rect.corners();
        self.draw_line(a, b, color, width);
        self.draw_line(b, c, color, width);
        self.draw_line(c, d, color, width);
        self.draw_line(d, a, color, width);
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, color: Color, width: f64) {
        let transform = self.stack.current();
        let half = width.max(1.0) * 0.5;
        let canvas_max = DVec2::new(self.width as f64, self.height as f64) + half;
        let Some((start, end)) = clip_segment(
            transform.transform_point2(from),
            transform.transform_point2(to),
            DVec2::splat(-half),
            canvas_max,
        ) else {
            return;
        };
        let steps = (end - start).abs().max_element().ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.fill_device_square(start.lerp(end, t), width.max(1.0), color);
        }
    }

    fn draw_points(&mut self, points: &[DVec2], size: f64, color: Color) {
        profile_scope!("raster_draw_points");
        let transform = self.stack.current();
        let side = (size * uniform_scale(&transform)).max(1.0);
        for point in points {
            let center = transform.transform_point2(*point);
            self.fill_device_square(center, side, color);
        }
    }

    fn draw_image(&mut self, target: Rect, image: &RgbaImage) {
        profile_scope!("raster_draw_image");
        if !target.is_valid() || image.width() == 0 || image.height() == 0 {
            return;
        }
        let transform = self.stack.current();
        let Some(inverse) = CoordinateConverter::inverse(&transform) else {
            return;
        };
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(&target, &transform) else {
            return;
        };
        let Some(canvas) = self.back.as_mut() else {
            return;
        };
        let (iw, ih) = (image.width() as f64, image.height() as f64);
        for py in y0..y1 {
            for px in x0..x1 {
                let local = inverse.transform_point2(DVec2::new(px as f64 + 0.5, py as f64 + 0.5));
                if !target.contains(local) {
                    continue;
                }
                let u = ((local.x - target.x) / target.width * iw).floor().clamp(0.0, iw - 1.0);
                let v = ((local.y - target.y) / target.height * ih).floor().clamp(0.0, ih - 1.0);
                let texel = image.get_pixel(u as u32, v as u32);
                blend(canvas.get_pixel_mut(px, py), texel.0);
            }
        }
    }
}

impl Surface for RasterSurface {
    fn create(&mut self) -> Result<(), SurfaceError> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::CreationFailed(format!(
                "zero-sized raster surface {}x{}",
                self.width, self.height
            )));
        }
        self.back = Some(RgbaImage::new(self.width, self.height));
        Ok(())
    }

    fn make_current(&mut self) -> Result<(), SurfaceError> {
        if self.back.is_none() {
            return Err(SurfaceError::NotCreated);
        }
        self.stack.reset(DAffine2::IDENTITY);
        Ok(())
    }

    fn swap_buffers(&mut self) {
        self.front = self.back.clone();
    }

    fn read_pixels(&mut self) -> Result<RgbaImage, SurfaceError> {
        self.front
            .clone()
            .ok_or_else(|| SurfaceError::ReadBack("no frame presented yet".into()))
    }

    fn destroy(&mut self) {
        self.back = None;
        self.front = None;
    }
}
