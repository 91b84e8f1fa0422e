//! Headless snapshot of a synthetic spatial view.
//!
//! Usage: `stview-snapshot <out.png> [width height]`

use anyhow::{Context as _, Result, bail};
use glam::{DAffine2, DVec2};
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use stview::input::{Modifiers, MouseButton, PointerEvent};
use stview::math::{Rect, Size};
use stview::node::{
    GridNode, ImageNode, MiniMapNode, NodeArena, SceneNode, SpotsNode, downcast_node, downcast_node_mut,
};
use stview::settings::ViewSettings;
use stview::surface::{RasterSurface, RenderContext};
use stview::SceneView;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Chip area in scene units
const CHIP: Rect = Rect::new(0.0, 0.0, 1000.0, 750.0);
const SPOT_COUNT: usize = 2000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(out) = args.next().map(PathBuf::from) else {
        bail!("usage: stview-snapshot <out.png> [width height]");
    };
    let width: u32 = match args.next() {
        Some(w) => w.parse().context("parse width")?,
        None => 800,
    };
    let height: u32 = match args.next() {
        Some(h) => h.parse().context("parse height")?,
        None => 600,
    };

    let mut arena = NodeArena::with_key();
    let mut view = SceneView::with_settings(ViewSettings::load());
    view.set_viewport(Rect::new(0.0, 0.0, width as f64, height as f64));
    view.set_scene(CHIP);

    // Tissue image at half resolution, stretched over the chip
    let mut image_node = ImageNode::with_image(tissue_image(500, 375));
    image_node.state_mut().set_transform(DAffine2::from_scale(DVec2::splat(2.0)));
    let image = arena.insert(Box::new(image_node));
    let grid = arena.insert(Box::new(GridNode::new(CHIP, 33, 35)));
    let spots = arena.insert(Box::new(SpotsNode::new(CHIP, random_spots(SPOT_COUNT))));
    let minimap = arena.insert(Box::new(MiniMapNode::new()));

    for id in [image, grid, spots, minimap] {
        view.add_rendering_node(id);
    }

    view.set_zoom(Size::new(1.5, 1.5));
    view.set_scene_focus_center_point_with_clamping(CHIP.center());

    // Rubber band over the middle of the viewport
    let (w, h) = (width as f64, height as f64);
    let from = DVec2::new(w * 0.3, h * 0.3);
    let to = DVec2::new(w * 0.6, h * 0.6);
    view.mouse_press(&mut arena, &PointerEvent::new(from, MouseButton::Right, Modifiers::NONE));
    view.mouse_move(&mut arena, &PointerEvent::new(to, MouseButton::Right, Modifiers::NONE));
    view.mouse_release(&mut arena, &PointerEvent::new(to, MouseButton::Right, Modifiers::NONE));

    if let Some(node) = downcast_node_mut::<MiniMapNode>(&mut arena, minimap) {
        for event in view.drain_events() {
            node.handle_view_event(&event);
        }
    }
    if let Some(node) = downcast_node::<SpotsNode>(&arena, spots) {
        info!(selected = node.selected_spots().len(), total = SPOT_COUNT, "Spots selected");
    }

    view.poll_updates(&mut arena);
    let mut context = RenderContext::new(RasterSurface::new(width, height));
    view.render(&mut context, &mut arena).context("render scene")?;
    let frame = view.grab_image(&mut context).context("read back frame")?;
    frame.save(&out).with_context(|| format!("write {}", out.display()))?;

    info!(path = %out.display(), width, height, "Snapshot written");
    Ok(())
}

/// Soft radial gradient standing in for a stained tissue section.
fn tissue_image(width: u32, height: u32) -> RgbaImage {
    let center = DVec2::new(width as f64 / 2.0, height as f64 / 2.0);
    let radius = center.min_element();
    RgbaImage::from_fn(width, height, |x, y| {
        let d = (DVec2::new(x as f64, y as f64).distance(center) / radius).min(1.0);
        let v = (1.0 - d * d) * 255.0;
        Rgba([(v * 0.8) as u8, (v * 0.45) as u8, (v * 0.7) as u8, 255])
    })
}

fn random_spots(count: usize) -> Vec<DVec2> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|_| DVec2::new(rng.gen_range(CHIP.x..CHIP.max().x), rng.gen_range(CHIP.y..CHIP.max().y)))
        .collect()
}
