//! Pointer and keyboard input handling for the scene view.
//!
//! This module turns host input events into view state changes (pan, zoom,
//! rubber bands) and into node-local events for the registered nodes.
//!
//! ## Architecture
//!
//! The view tracks the active gesture with an explicit state machine
//! ([`GestureState`]) rather than a pair of booleans, so panning and rubber
//! banding can never be active together.
//!
//! ## Modules
//!
//! - `events` - Host-independent pointer, key and wheel events
//! - `state` - Gesture state machine and rubber band geometry
//! - `coords` - Device/local coordinate conversion
//! - `mouse_down` - Press handling (node dispatch, gesture start)
//! - `drag` - Move handling (panning, rubber band tracking)
//! - `mouse_up` - Release handling (gesture end, selection delivery)
//! - `transform` - Keyboard panning, wheel zoom, pointer dispatch

pub mod coords;
mod drag;
mod events;
mod mouse_down;
mod mouse_up;
mod state;
mod transform;

pub use coords::CoordinateConverter;
pub use events::{Key, Modifiers, MouseButton, PointerEvent, WheelEvent};
pub use state::{GestureState, rubber_band_rect};
