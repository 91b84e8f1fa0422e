//! Chip grid layer: evenly spaced lines over the capture area.

use super::{NodeFlags, NodeState, SceneNode};
use crate::constants::DEFAULT_GRID_COLOR;
use crate::math::{Anchor, Rect};
use crate::surface::{Color, Painter};
use glam::DVec2;
use std::any::Any;

pub struct GridNode {
    state: NodeState,
    area: Rect,
    columns: u32,
    rows: u32,
    color: Color,
    line_width: f64,
}

impl GridNode {
    /// A grid of `columns` x `rows` cells covering `area` in scene units.
    pub fn new(area: Rect, columns: u32, rows: u32) -> Self {
        let flags = NodeFlags {
            transformable: true,
            ..NodeFlags::default()
        };
        Self {
            state: NodeState::new(Anchor::None, flags),
            area,
            columns: columns.max(1),
            rows: rows.max(1),
            color: DEFAULT_GRID_COLOR,
            line_width: 1.0,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.state.request_update();
        }
    }

    pub fn set_dimensions(&mut self, columns: u32, rows: u32) {
        let (columns, rows) = (columns.max(1), rows.max(1));
        if (self.columns, self.rows) != (columns, rows) {
            self.columns = columns;
            self.rows = rows;
            self.state.request_update();
        }
    }

    pub fn cell_size(&self) -> DVec2 {
        DVec2::new(
            self.area.width / self.columns as f64,
            self.area.height / self.rows as f64,
        )
    }
}

impl SceneNode for GridNode {
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
        let cell = self.cell_size();
        let (min, max) = (self.area.min(), self.area.max());

        for column in 1..self.columns {
            let x = min.x + cell.x * column as f64;
            painter.draw_line(DVec2::new(x, min.y), DVec2::new(x, max.y), self.color, self.line_width);
        }
        for row in 1..self.rows {
            let y = min.y + cell.y * row as f64;
            painter.draw_line(DVec2::new(min.x, y), DVec2::new(max.x, y), self.color, self.line_width);
        }
        painter.stroke_rect(self.area, self.color, self.line_width);
    }
}
