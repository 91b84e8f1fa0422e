//! View-wide constants.
//!
//! Centralizes zoom bounds, panning steps and default colors so the view,
//! the settings defaults and the tests agree on the same numbers.

use crate::math::Size;

// ============================================================================
// Zoom
// ============================================================================

/// Smallest zoom the view accepts (both axes)
pub const DEFAULT_ZOOM_MIN: Size = Size::new(1.0, 1.0);

/// Largest zoom the view accepts (both axes)
pub const DEFAULT_ZOOM_MAX: Size = Size::new(20.0, 20.0);

/// Multiplicative step applied by `zoom_in`
pub const DEFAULT_ZOOM_IN: f64 = 1.1 / 1.0;

/// Multiplicative step applied by `zoom_out`
pub const DEFAULT_ZOOM_OUT: f64 = 1.0 / 1.1;

/// Base of the wheel zoom curve: `base^(-delta / WHEEL_DELTA_DIVISOR)`
pub const WHEEL_ZOOM_BASE: f64 = 4.0 / 3.0;

/// Wheel delta units per zoom step (two notches of 120)
pub const WHEEL_DELTA_DIVISOR: f64 = 240.0;

// ============================================================================
// Panning & Rotation
// ============================================================================

/// Pan distance per arrow key press, in device pixels
pub const DELTA_PANNING: f64 = 3.0;

/// Multiplier applied to pointer movement while panning
pub const DELTA_MOUSE_PANNING: f64 = 1.0;

/// Largest rotation delta accepted by a single `rotate` call
pub const MAX_ROTATION_DELTA: f64 = 180.0;

/// Stored rotation is folded into `[-ROTATION_RANGE, ROTATION_RANGE]`
pub const ROTATION_RANGE: f64 = 360.0;

// ============================================================================
// Colors (RGBA)
// ============================================================================

/// Clear color for every frame
pub const DEFAULT_BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Outline of the in-progress rubber band
pub const DEFAULT_RUBBER_BAND_COLOR: [u8; 4] = [255, 255, 255, 200];

/// Grid line color
pub const DEFAULT_GRID_COLOR: [u8; 4] = [70, 70, 70, 255];

/// Spot color when not selected
pub const DEFAULT_SPOT_COLOR: [u8; 4] = [0, 155, 255, 255];

/// Spot color when selected
pub const DEFAULT_SELECTED_SPOT_COLOR: [u8; 4] = [255, 40, 40, 255];

// ============================================================================
// Node defaults
// ============================================================================

/// Default spot diameter in scene units
pub const DEFAULT_SPOT_SIZE: f64 = 4.0;

/// Default minimap overlay size in device pixels
pub const DEFAULT_MINIMAP_SIZE: Size = Size::new(160.0, 120.0);

/// Margin between the minimap and the viewport corner
pub const MINIMAP_MARGIN: f64 = 10.0;
