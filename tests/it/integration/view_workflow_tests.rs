//! View state workflows: notifications, redraw loop, settings, reset.

use crate::helpers::*;
use glam::DVec2;
use stview::input::{Key, MouseButton};
use stview::math::{Rect, Size};
use stview::node::{GridNode, MiniMapNode, NodeArena, NodeId, downcast_node_mut};
use stview::settings::ViewSettings;
use stview::{SceneView, ViewEvent};
use tempfile::tempdir;

/// Forward queued view notifications to the minimap, as a host would.
fn feed_minimap(view: &mut SceneView, arena: &mut NodeArena, minimap: NodeId) {
    let map = downcast_node_mut::<MiniMapNode>(arena, minimap).unwrap();
    for event in view.drain_events() {
        map.handle_view_event(&event);
    }
}

#[test]
fn test_minimap_tracks_view_events() {
    let (mut view, mut arena, ids) = TestSceneBuilder::new().with_node(Box::new(MiniMapNode::new())).build();
    let minimap = ids[0];
    {
        let map = downcast_node_mut::<MiniMapNode>(&mut arena, minimap).unwrap();
        map.set_scene(view.scene());
        map.set_viewport(view.viewport());
    }

    view.set_zoom(Size::splat(2.0));
    feed_minimap(&mut view, &mut arena, minimap);

    let visible = downcast_node_mut::<MiniMapNode>(&mut arena, minimap)
        .unwrap()
        .visible_area()
        .unwrap();
    assert!(approx_eq(visible.min(), DVec2::ZERO));
    assert!(approx_eq(visible.max(), DVec2::new(400.0, 300.0)));

    view.center_on(DVec2::new(400.0, 300.0));
    feed_minimap(&mut view, &mut arena, minimap);

    let visible = downcast_node_mut::<MiniMapNode>(&mut arena, minimap)
        .unwrap()
        .visible_area()
        .unwrap();
    assert!(approx_eq(visible.min(), DVec2::new(200.0, 150.0)));
    assert!(approx_eq(visible.max(), DVec2::new(600.0, 450.0)));
    assert!(view.poll_updates(&mut arena));
}

#[test]
fn test_transform_notifications_coalesce() {
    let (mut view, _arena, _) = TestSceneBuilder::new().build();

    view.set_zoom(Size::splat(2.0));
    view.pan_by(DVec2::new(5.0, 0.0));
    view.key_press(Key::Down);

    let events = view.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], ViewEvent::SceneTransformationsUpdated(view.scene_transformations()));
    assert!(view.drain_events().is_empty());
}

#[test]
fn test_resize_reports_device_viewport() {
    let (mut view, _arena, _) = TestSceneBuilder::new().build();
    view.resize(500.0, 400.0, 2.0);

    let events = view.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], ViewEvent::ViewPortUpdated(Rect::new(0.0, 0.0, 1000.0, 800.0)));
    assert!(matches!(events[1], ViewEvent::SceneTransformationsUpdated(_)));

    // Same device size again: nothing to report
    view.resize(1000.0, 800.0, 1.0);
    assert!(view.drain_events().is_empty());
}

#[test]
fn test_redraw_loop() {
    let log = new_log();
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 800.0, 600.0), &log)))
        .build();
    assert!(!view.take_redraw());

    view.key_press(Key::Left);
    assert!(view.take_redraw());
    assert!(!view.take_redraw());

    // The recording node asks for an update when pressed
    press(&mut view, &mut arena, (10.0, 10.0), MouseButton::Middle);
    assert!(view.poll_updates(&mut arena));
    assert!(view.take_redraw());
    assert!(!view.poll_updates(&mut arena));
}

#[test]
fn test_settings_from_disk_bound_the_zoom() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("view.json");
    let stored = ViewSettings {
        zoom_max: Size::new(4.0, 4.0),
        ..ViewSettings::default()
    };
    stored.save_to(&path).unwrap();

    let (mut view, _arena, _) = TestSceneBuilder::new().with_zoom(10.0).build();
    assert_eq!(view.zoom(), Size::splat(10.0));

    view.apply_settings(ViewSettings::load_from(&path).unwrap());
    assert_eq!(view.zoom(), Size::splat(4.0));

    view.set_zoom(Size::splat(8.0));
    assert_eq!(view.zoom(), Size::splat(4.0));
}

#[test]
fn test_clear_data_resets_view_but_keeps_arena() {
    let (mut view, arena, ids) = TestSceneBuilder::new()
        .with_zoom(3.0)
        .with_node(Box::new(GridNode::new(Rect::new(0.0, 0.0, 800.0, 600.0), 4, 4)))
        .build();
    view.pan_by(DVec2::new(20.0, 20.0));
    view.rotate(45.0);

    view.clear_data();

    assert!(view.nodes().is_empty());
    assert_eq!(view.zoom(), Size::splat(1.0));
    assert_eq!(view.pan(), DVec2::ZERO);
    assert_eq!(view.rotation(), 0.0);
    assert!(arena.contains_key(ids[0]));

    // The same node can be registered again
    assert!(view.add_rendering_node(ids[0]));
}
