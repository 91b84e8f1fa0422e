//! User-tunable view settings, stored as JSON in the config directory.
//!
//! Missing fields fall back to the defaults in [`crate::constants`], so an
//! older or partial file still loads.

use crate::constants::{
    DEFAULT_BACKGROUND, DEFAULT_RUBBER_BAND_COLOR, DEFAULT_ZOOM_IN, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN,
    DELTA_MOUSE_PANNING, DELTA_PANNING, WHEEL_ZOOM_BASE,
};
use crate::error::SettingsError;
use crate::math::Size;
use crate::surface::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Point the view rotates around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPivot {
    /// Center of the viewport in device pixels
    #[default]
    ViewportCenter,
    /// Center of the scene rectangle, wherever it currently is on screen
    SceneCenter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub zoom_min: Size,
    pub zoom_max: Size,
    /// Factor applied by `zoom_in`; `zoom_out` uses its reciprocal
    pub zoom_in_factor: f64,
    /// Pan distance per arrow key press
    pub key_pan_step: f64,
    /// Multiplier on pointer movement while panning
    pub mouse_pan_factor: f64,
    /// Base of the wheel zoom curve
    pub wheel_step: f64,
    pub background: Color,
    pub rubber_band_color: Color,
    pub rotation_pivot: RotationPivot,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom_min: DEFAULT_ZOOM_MIN,
            zoom_max: DEFAULT_ZOOM_MAX,
            zoom_in_factor: DEFAULT_ZOOM_IN,
            key_pan_step: DELTA_PANNING,
            mouse_pan_factor: DELTA_MOUSE_PANNING,
            wheel_step: WHEEL_ZOOM_BASE,
            background: DEFAULT_BACKGROUND,
            rubber_band_color: DEFAULT_RUBBER_BAND_COLOR,
            rotation_pivot: RotationPivot::default(),
        }
    }
}

impl ViewSettings {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            debug!("No config directory, using default view settings");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load view settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings: ViewSettings = serde_json::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = default_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write atomically: serialize into a sibling temp file, then rename over `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let dir = parent_dir(path);
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| SettingsError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        debug!(path = %path.display(), "View settings saved");
        Ok(())
    }

    /// Replace values the view cannot work with by their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.zoom_min.is_valid() || !self.zoom_max.is_valid() {
            self.zoom_min = defaults.zoom_min;
            self.zoom_max = defaults.zoom_max;
        }
        if self.zoom_min.width > self.zoom_max.width || self.zoom_min.height > self.zoom_max.height {
            warn!(min = ?self.zoom_min, max = ?self.zoom_max, "Zoom bounds inverted, using defaults");
            self.zoom_min = defaults.zoom_min;
            self.zoom_max = defaults.zoom_max;
        }
        if !(self.zoom_in_factor > 1.0 && self.zoom_in_factor.is_finite()) {
            self.zoom_in_factor = defaults.zoom_in_factor;
        }
        if !(self.wheel_step > 1.0 && self.wheel_step.is_finite()) {
            self.wheel_step = defaults.wheel_step;
        }
        if !self.key_pan_step.is_finite() {
            self.key_pan_step = defaults.key_pan_step;
        }
        if !self.mouse_pan_factor.is_finite() {
            self.mouse_pan_factor = defaults.mouse_pan_factor;
        }
        self
    }
}

/// `<config dir>/stview/view.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stview").join("view.json"))
}

/// Directory holding `path`; `.` for a bare file name.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
