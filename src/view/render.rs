//! Render pass and frame read-back.

use super::SceneView;
use crate::error::ViewResult;
use crate::node::NodeArena;
use crate::profile_scope;
use crate::surface::{RenderContext, Surface};
use image::RgbaImage;
use tracing::trace;

impl SceneView {
    /// Draw every visible registered node, in registration order, then the
    /// rubber band if one is being dragged.
    ///
    /// If the surface cannot be created or bound the view state is left
    /// untouched and the error returned; the next call tries again.
    pub fn render<S: Surface>(&mut self, context: &mut RenderContext<S>, arena: &mut NodeArena) -> ViewResult<()> {
        profile_scope!("scene_render");
        let mut frame = context.begin_frame()?;
        self.perf.begin_frame();

        frame.clear(self.settings.background);
        frame.set_projection(self.viewport);

        let mut drawn = 0usize;
        for id in &self.nodes {
            let Some(node) = arena.get_mut(*id) else {
                continue;
            };
            if !node.visible() {
                continue;
            }
            let transform = self.node_transformations(&**node);
            frame.push_transform(transform);
            node.draw(&mut *frame);
            frame.pop_transform();
            drawn += 1;
        }

        if let Some(band) = self.gesture.rubber_band_rect() {
            frame.stroke_rect(band, self.settings.rubber_band_color, 1.0);
        }
        drop(frame);

        self.redraw_pending = false;
        if let Some(sample) = self.perf.end_frame(drawn) {
            trace!(nodes = sample.nodes, frame_ms = sample.elapsed_ms, "Frame rendered");
        }
        Ok(())
    }

    /// Copy of the last rendered frame.
    pub fn grab_image<S: Surface>(&self, context: &mut RenderContext<S>) -> ViewResult<RgbaImage> {
        Ok(context.read_pixels()?)
    }
}
