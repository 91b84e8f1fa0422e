//! Gene spot layer.
//!
//! Turns rubber-band selection events into a set of selected spot indices.
//! Mapping those indices back to genes and counts is the dataset page's job.

use super::{NodeFlags, NodeState, SceneNode};
use crate::constants::{DEFAULT_SELECTED_SPOT_COLOR, DEFAULT_SPOT_COLOR, DEFAULT_SPOT_SIZE};
use crate::input::{MouseButton, PointerEvent};
use crate::math::{Anchor, Rect};
use crate::profile_scope;
use crate::selection::{SelectionEvent, SelectionMode};
use crate::spatial_index::SpotIndex;
use crate::surface::{Color, Painter};
use glam::DVec2;
use std::any::Any;
use std::collections::BTreeSet;
use tracing::debug;

pub struct SpotsNode {
    state: NodeState,
    area: Rect,
    positions: Vec<DVec2>,
    index: SpotIndex,
    selected: BTreeSet<usize>,
    spot_size: f64,
    color: Color,
    selected_color: Color,
}

impl SpotsNode {
    /// Spots at `positions` (scene units) on a chip covering `area`.
    pub fn new(area: Rect, positions: Vec<DVec2>) -> Self {
        let flags = NodeFlags {
            selectable: true,
            transformable: true,
            rubber_bandable: true,
            ..NodeFlags::default()
        };
        Self {
            state: NodeState::new(Anchor::None, flags),
            area,
            index: SpotIndex::from_positions(&positions),
            positions,
            selected: BTreeSet::new(),
            spot_size: DEFAULT_SPOT_SIZE,
            color: DEFAULT_SPOT_COLOR,
            selected_color: DEFAULT_SELECTED_SPOT_COLOR,
        }
    }

    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    /// Replace all spots; clears the selection.
    pub fn set_positions(&mut self, positions: Vec<DVec2>) {
        self.index.rebuild(&positions);
        self.positions = positions;
        self.selected.clear();
        self.state.request_update();
    }

    pub fn set_spot_size(&mut self, size: f64) {
        if size > 0.0 && size != self.spot_size {
            self.spot_size = size;
            self.state.request_update();
        }
    }

    /// Selected spot indices in ascending order
    pub fn selected_spots(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    pub fn is_selected(&self, spot: usize) -> bool {
        self.selected.contains(&spot)
    }

    pub fn clear_selection(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.state.request_update();
        }
    }

    fn apply_selection(&mut self, hits: Vec<usize>, mode: SelectionMode) -> bool {
        let before = self.selected.len();
        match mode {
            SelectionMode::New => {
                let next: BTreeSet<usize> = hits.into_iter().collect();
                let changed = next != self.selected;
                self.selected = next;
                return changed;
            }
            SelectionMode::Add => self.selected.extend(hits),
            SelectionMode::Remove => {
                for spot in hits {
                    self.selected.remove(&spot);
                }
            }
        }
        self.selected.len() != before
    }
}

impl SceneNode for SpotsNode {
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
        self.area
    }

    fn draw(&mut self, painter: &mut dyn Painter) {
        profile_scope!("draw_spots");
        let mut selected = Vec::with_capacity(self.selected.len());
        let mut unselected = Vec::with_capacity(self.positions.len());
        for (spot, position) in self.positions.iter().enumerate() {
            if self.selected.contains(&spot) {
                selected.push(*position);
            } else {
                unselected.push(*position);
            }
        }

        if !unselected.is_empty() {
            painter.draw_points(&unselected, self.spot_size, self.color);
        }
        if !selected.is_empty() {
            painter.draw_points(&selected, self.spot_size, self.selected_color);
        }
    }

    fn mouse_press(&mut self, event: &PointerEvent) {
        if event.button != MouseButton::Left {
            return;
        }
        if let Some(spot) = self.index.nearest_within(event.position, self.spot_size) {
            if !self.selected.remove(&spot) {
                self.selected.insert(spot);
            }
            self.state.request_update();
        }
    }

    fn set_selection_area(&mut self, event: &SelectionEvent) {
        profile_scope!("spot_selection");
        let hits = if event.is_empty() {
            Vec::new()
        } else {
            self.index.query_rect(&event.area())
        };
        let hit_count = hits.len();
        if self.apply_selection(hits, event.mode()) {
            self.state.request_update();
        }
        debug!(
            hits = hit_count,
            selected = self.selected.len(),
            mode = ?event.mode(),
            "Spot selection applied"
        );
    }
}
