//! Rubber-band selection from pointer gesture to node selection state.

use crate::helpers::*;
use glam::DVec2;
use stview::input::{Modifiers, MouseButton, PointerEvent};
use stview::math::{Anchor, Rect};
use stview::node::{NodeArena, NodeFlags, SpotsNode, downcast_node};
use stview::selection::SelectionMode;

fn chip_spots() -> SpotsNode {
    SpotsNode::new(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        vec![
            DVec2::new(100.0, 100.0),
            DVec2::new(150.0, 120.0),
            DVec2::new(500.0, 400.0),
        ],
    )
}

#[test]
fn test_select_add_remove_clear() {
    let (mut view, mut arena, ids) = TestSceneBuilder::new().with_node(Box::new(chip_spots())).build();
    let spots = ids[0];
    let selected = |arena: &NodeArena| downcast_node::<SpotsNode>(arena, spots).unwrap().selected_spots();

    rubber_band(&mut view, &mut arena, (90.0, 90.0), (160.0, 130.0), Modifiers::NONE);
    assert_eq!(selected(&arena), vec![0, 1]);
    assert!(view.poll_updates(&mut arena));

    rubber_band(&mut view, &mut arena, (490.0, 390.0), (510.0, 410.0), Modifiers::shift());
    assert_eq!(selected(&arena), vec![0, 1, 2]);

    rubber_band(&mut view, &mut arena, (95.0, 95.0), (105.0, 105.0), Modifiers::control());
    assert_eq!(selected(&arena), vec![1, 2]);

    rubber_band(&mut view, &mut arena, (700.0, 10.0), (790.0, 20.0), Modifiers::NONE);
    assert!(selected(&arena).is_empty());
}

#[test]
fn test_selection_follows_zoom() {
    let (mut view, mut arena, ids) = TestSceneBuilder::new()
        .with_zoom(2.0)
        .with_node(Box::new(chip_spots()))
        .build();

    // Device (180, 180)..(320, 260) is scene (90, 90)..(160.5, 130.5)
    rubber_band(&mut view, &mut arena, (180.0, 180.0), (320.0, 260.0), Modifiers::NONE);

    let node = downcast_node::<SpotsNode>(&arena, ids[0]).unwrap();
    assert_eq!(node.selected_spots(), vec![0, 1]);
}

#[test]
fn test_band_missing_the_node_clears_selection() {
    let small = SpotsNode::new(
        Rect::new(0.0, 0.0, 100.0, 100.0),
        vec![DVec2::new(20.0, 20.0), DVec2::new(80.0, 80.0)],
    );
    let (mut view, mut arena, ids) = TestSceneBuilder::new().with_node(Box::new(small)).build();

    rubber_band(&mut view, &mut arena, (0.0, 0.0), (100.0, 100.0), Modifiers::NONE);
    assert_eq!(downcast_node::<SpotsNode>(&arena, ids[0]).unwrap().selected_spots().len(), 2);

    rubber_band(&mut view, &mut arena, (400.0, 400.0), (500.0, 500.0), Modifiers::NONE);
    assert!(downcast_node::<SpotsNode>(&arena, ids[0]).unwrap().selected_spots().is_empty());
}

#[test]
fn test_selection_mode_uses_left_button() {
    let (mut view, mut arena, ids) = TestSceneBuilder::new().with_node(Box::new(chip_spots())).build();
    view.set_selection_mode(true);

    let from = DVec2::new(90.0, 90.0);
    let to = DVec2::new(160.0, 130.0);
    view.mouse_press(&mut arena, &PointerEvent::new(from, MouseButton::Left, Modifiers::NONE));
    view.mouse_move(&mut arena, &PointerEvent::new(to, MouseButton::Left, Modifiers::NONE));
    view.mouse_release(&mut arena, &PointerEvent::new(to, MouseButton::Left, Modifiers::NONE));

    assert_eq!(view.pan(), DVec2::ZERO);
    assert!(view.gesture().is_idle());
    assert_eq!(downcast_node::<SpotsNode>(&arena, ids[0]).unwrap().selected_spots(), vec![0, 1]);
}

#[test]
fn test_only_rubber_bandable_nodes_receive_selections() {
    let log = new_log();
    let plain = RecordingNode::new(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        Anchor::None,
        NodeFlags {
            selectable: true,
            transformable: true,
            ..NodeFlags::default()
        },
        &log,
    );
    let banded = new_log();
    let (mut view, mut arena, _) = TestSceneBuilder::new()
        .with_node(Box::new(plain))
        .with_node(Box::new(RecordingNode::interactive(Rect::new(0.0, 0.0, 800.0, 600.0), &banded)))
        .build();

    rubber_band(&mut view, &mut arena, (10.0, 10.0), (50.0, 30.0), Modifiers::shift());

    assert!(!log.borrow().iter().any(|r| matches!(r, Received::Selection(_))));
    let selections: Vec<_> = banded
        .borrow()
        .iter()
        .filter_map(|r| match r {
            Received::Selection(event) => Some(*event),
            _ => None,
        })
        .collect();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].mode(), SelectionMode::Add);
    assert_eq!(selections[0].area(), Rect::new(10.0, 10.0, 41.0, 21.0));
}
