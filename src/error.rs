//! Error types for the scene view.
//!
//! Geometry that is simply invalid (degenerate rectangles, oversized rotation
//! deltas) never becomes an error: the view keeps its last good state. These
//! types cover the failures a host actually has to react to.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the graphics surface behind a [`crate::surface::RenderContext`].
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The backend could not create its context or drawable
    #[error("surface creation failed: {0}")]
    CreationFailed(String),

    /// An operation needed a surface that has not been created yet
    #[error("surface not created")]
    NotCreated,

    /// Another render context is bound on this thread
    #[error("another graphics context is current")]
    ContextBusy,

    /// Reading back the framebuffer failed
    #[error("pixel read-back failed: {0}")]
    ReadBack(String),
}

/// Errors that can occur while loading or saving view settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform has no per-user config directory
    #[error("no config directory available")]
    NoConfigDir,

    /// Atomic replace of the settings file failed
    #[error("could not persist {path:?}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Top-level error for view operations that touch the outside world.
#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type alias for view operations
pub type ViewResult<T> = Result<T, ViewError>;
