//! Interactive 2D scene view for spatial transcriptomics data.
//!
//! A [`view::SceneView`] draws a list of [`node::SceneNode`]s (tissue image,
//! gene spots, chip grid, minimap) through a [`surface::RenderContext`],
//! handles pan/zoom/rotation and dispatches pointer input and rubber-band
//! selections to the nodes in their own local coordinates.

pub mod constants;
pub mod error;
pub mod input;
pub mod math;
pub mod node;
pub mod perf;
pub mod selection;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod surface;
pub mod view;

pub use error::{SettingsError, SurfaceError, ViewError, ViewResult};
pub use view::{SceneView, ViewEvent};
