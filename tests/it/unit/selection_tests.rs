//! Unit tests for selection modes and spot selection.

use glam::DVec2;
use stview::input::Modifiers;
use stview::math::Rect;
use stview::node::{SceneNode, SpotsNode};
use stview::selection::{SelectionEvent, SelectionMode};

fn spots() -> SpotsNode {
    let positions = vec![
        DVec2::new(10.0, 10.0),
        DVec2::new(20.0, 10.0),
        DVec2::new(80.0, 80.0),
        DVec2::new(90.0, 90.0),
    ];
    SpotsNode::new(Rect::new(0.0, 0.0, 100.0, 100.0), positions)
}

#[test]
fn test_mode_from_modifiers() {
    assert_eq!(SelectionMode::from_modifiers(Modifiers::NONE), SelectionMode::New);
    assert_eq!(SelectionMode::from_modifiers(Modifiers::shift()), SelectionMode::Add);
    assert_eq!(SelectionMode::from_modifiers(Modifiers::control()), SelectionMode::Remove);

    let platform = Modifiers {
        platform: true,
        ..Modifiers::NONE
    };
    assert_eq!(SelectionMode::from_modifiers(platform), SelectionMode::Remove);
}

#[test]
fn test_new_replaces_selection() {
    let mut node = spots();
    node.set_selection_area(&SelectionEvent::new(Rect::new(0.0, 0.0, 30.0, 30.0), SelectionMode::New));
    assert_eq!(node.selected_spots(), vec![0, 1]);

    node.set_selection_area(&SelectionEvent::new(Rect::new(70.0, 70.0, 30.0, 30.0), SelectionMode::New));
    assert_eq!(node.selected_spots(), vec![2, 3]);
}

#[test]
fn test_add_and_remove() {
    let mut node = spots();
    node.set_selection_area(&SelectionEvent::new(Rect::new(0.0, 0.0, 15.0, 15.0), SelectionMode::New));
    node.set_selection_area(&SelectionEvent::new(Rect::new(75.0, 75.0, 10.0, 10.0), SelectionMode::Add));
    assert_eq!(node.selected_spots(), vec![0, 2]);

    node.set_selection_area(&SelectionEvent::new(Rect::new(0.0, 0.0, 50.0, 50.0), SelectionMode::Remove));
    assert_eq!(node.selected_spots(), vec![2]);
    assert!(node.is_selected(2));
    assert!(!node.is_selected(0));
}

#[test]
fn test_empty_area_with_new_clears() {
    let mut node = spots();
    node.set_selection_area(&SelectionEvent::new(Rect::new(0.0, 0.0, 100.0, 100.0), SelectionMode::New));
    assert_eq!(node.selected_spots().len(), 4);

    node.set_selection_area(&SelectionEvent::new(Rect::empty(), SelectionMode::New));
    assert!(node.selected_spots().is_empty());
}

#[test]
fn test_empty_area_with_add_keeps_selection() {
    let mut node = spots();
    node.set_selection_area(&SelectionEvent::new(Rect::new(0.0, 0.0, 15.0, 15.0), SelectionMode::New));
    node.set_selection_area(&SelectionEvent::new(Rect::empty(), SelectionMode::Add));
    assert_eq!(node.selected_spots(), vec![0]);
}

#[test]
fn test_replacing_positions_drops_selection() {
    let mut node = spots();
    node.set_selection_area(&SelectionEvent::new(Rect::new(0.0, 0.0, 100.0, 100.0), SelectionMode::New));
    node.set_positions(vec![DVec2::new(50.0, 50.0)]);
    assert!(node.selected_spots().is_empty());
    assert_eq!(node.positions().len(), 1);
}
