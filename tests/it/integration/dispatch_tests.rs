//! Pointer dispatch from device space to node-local space.

use crate::helpers::*;
use glam::DVec2;
use stview::input::{Modifiers, MouseButton, PointerEvent};
use stview::math::{Anchor, Rect, Size};
use stview::node::{MiniMapNode, NodeFlags, SceneNode, downcast_node_mut};

#[test]
fn test_press_arrives_in_local_space() {
    let log = new_log();
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_zoom(2.0)
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 800.0, 600.0), &log)))
        .build();

    press(&mut view, &mut arena, (100.0, 60.0), MouseButton::Left);

    let received = log.borrow();
    assert_eq!(received.len(), 1);
    let Received::Press(local) = received[0] else {
        panic!("expected a press, got {:?}", received[0]);
    };
    assert!(approx_eq(local, DVec2::new(50.0, 30.0)));
}

#[test]
fn test_press_outside_bounds_is_not_delivered() {
    let log = new_log();
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 100.0, 100.0), &log)))
        .build();

    press(&mut view, &mut arena, (300.0, 300.0), MouseButton::Left);
    release(&mut view, &mut arena, (300.0, 300.0), MouseButton::Left);

    assert!(log.borrow().is_empty());
}

#[test]
fn test_every_hit_node_receives_the_press() {
    let first = new_log();
    let second = new_log();
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 200.0, 200.0), &first)))
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 400.0, 400.0), &second)))
        .build();

    press(&mut view, &mut arena, (50.0, 50.0), MouseButton::Right);

    assert_eq!(first.borrow().len(), 1);
    assert_eq!(second.borrow().len(), 1);
}

#[test]
fn test_unselectable_and_hidden_nodes_are_skipped() {
    let log = new_log();
    let mut hidden = RecordingNode::interactive(Rect::new(0.0, 0.0, 800.0, 600.0), &log);
    hidden.state_mut().set_visible(false);
    let passive = RecordingNode::new(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        Anchor::None,
        NodeFlags {
            transformable: true,
            ..NodeFlags::default()
        },
        &log,
    );
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_node(Box::new(hidden))
        .with_node(Box::new(passive))
        .build();

    press(&mut view, &mut arena, (10.0, 10.0), MouseButton::Left);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_overlay_ignores_zoom() {
    let log = new_log();
    let overlay = RecordingNode::new(
        Rect::new(-100.0, 0.0, 100.0, 100.0),
        Anchor::NorthEast,
        NodeFlags {
            selectable: true,
            ..NodeFlags::default()
        },
        &log,
    );
    let (mut view, mut arena, _) = TestSceneBuilder::new().with_zoom(3.0).with_node(Box::new(overlay)).build();

    press(&mut view, &mut arena, (750.0, 50.0), MouseButton::Left);

    let received = log.borrow();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], Received::Press(DVec2::new(-50.0, 50.0)));
}

#[test]
fn test_moves_need_a_held_button() {
    let log = new_log();
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 800.0, 600.0), &log)))
        .build();

    let hover = PointerEvent::new(DVec2::new(20.0, 20.0), MouseButton::None, Modifiers::NONE);
    view.mouse_move(&mut arena, &hover);
    assert!(log.borrow().is_empty());

    press(&mut view, &mut arena, (20.0, 20.0), MouseButton::Left);
    let drag = PointerEvent::new(DVec2::new(30.0, 20.0), MouseButton::Left, Modifiers::NONE);
    view.mouse_move(&mut arena, &drag);

    assert!(log.borrow().iter().any(|r| matches!(r, Received::Move(_))));
    assert_eq!(view.pan(), DVec2::new(10.0, 0.0));
}

#[test]
fn test_rubber_band_drag_is_not_forwarded_as_move() {
    let log = new_log();
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 800.0, 600.0), &log)))
        .build();

    press(&mut view, &mut arena, (20.0, 20.0), MouseButton::Right);
    let drag = PointerEvent::new(DVec2::new(60.0, 60.0), MouseButton::Right, Modifiers::NONE);
    view.mouse_move(&mut arena, &drag);

    assert!(!log.borrow().iter().any(|r| matches!(r, Received::Move(_))));
    assert!(view.gesture().is_rubber_banding());
}

#[test]
fn test_minimap_click_recenters_with_clamping() {
    let (mut view, mut arena, ids) = TestSceneBuilder::new()
        .with_scene(1000.0, 750.0)
        .with_zoom(2.0)
        .with_node(Box::new(MiniMapNode::with_size(Size::new(160.0, 120.0))))
        .build();
    let minimap = ids[0];

    {
        let map = downcast_node_mut::<MiniMapNode>(&mut arena, minimap).unwrap();
        map.set_scene(view.scene());
        map.set_viewport(view.viewport());
    }

    // Minimap spans device x 630..790, y 10..130; this is scene (12.5, 12.5)
    press(&mut view, &mut arena, (632.0, 12.0), MouseButton::Left);
    release(&mut view, &mut arena, (632.0, 12.0), MouseButton::Left);

    let target = downcast_node_mut::<MiniMapNode>(&mut arena, minimap)
        .unwrap()
        .take_focus_request()
        .unwrap();
    assert!(approx_eq(target, DVec2::new(12.5, 12.5)));

    view.set_scene_focus_center_point_with_clamping(target);
    assert!(approx_eq(view.scene_focus_center_point(), DVec2::new(250.0, 187.5)));
}
