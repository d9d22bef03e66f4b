// Application settings
// Loaded from ~/.config/ideagrid/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest grid window, in columns or rows, the renderer will draw.
pub const MAX_VISIBLE: u32 = 64;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // View
    #[serde(rename = "view.zoom")]
    pub zoom: u32,
    #[serde(rename = "view.zoomStep")]
    pub zoom_step: u32,
    #[serde(rename = "view.minZoom")]
    pub min_zoom: u32,
    #[serde(rename = "view.maxZoom")]
    pub max_zoom: u32,

    // Grid
    #[serde(rename = "grid.visibleCols")]
    pub visible_cols: u32,
    #[serde(rename = "grid.visibleRows")]
    pub visible_rows: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom: 128,
            zoom_step: 8,
            min_zoom: 8,
            max_zoom: 512,
            visible_cols: 5,
            visible_rows: 5,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ideagrid");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file gives defaults silently;
    /// unreadable or malformed files log a warning and give defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => settings.normalized(),
                Err(e) => {
                    log::warn!("error parsing {}: {}", path.display(), e);
                    log::warn!("using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        serde_json::from_str(&cleaned)
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Repair inconsistent values: swapped zoom bounds, a zero step, a zoom
    /// outside its range, a grid dimension that is zero or above
    /// [`MAX_VISIBLE`].
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        if self.min_zoom > self.max_zoom {
            log::warn!(
                "view.minZoom {} exceeds view.maxZoom {}; swapping",
                self.min_zoom,
                self.max_zoom
            );
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        if self.zoom_step == 0 {
            log::warn!("view.zoomStep must be positive; using {}", defaults.zoom_step);
            self.zoom_step = defaults.zoom_step;
        }
        let clamped = self.zoom.clamp(self.min_zoom, self.max_zoom);
        if clamped != self.zoom {
            log::warn!("view.zoom {} outside range; using {}", self.zoom, clamped);
            self.zoom = clamped;
        }
        self.visible_cols =
            visible_dimension("grid.visibleCols", self.visible_cols, defaults.visible_cols);
        self.visible_rows =
            visible_dimension("grid.visibleRows", self.visible_rows, defaults.visible_rows);
        self
    }
}

fn visible_dimension(key: &str, value: u32, default: u32) -> u32 {
    match value {
        0 => default,
        v if v > MAX_VISIBLE => {
            log::warn!("{} {} too large; using {}", key, v, MAX_VISIBLE);
            MAX_VISIBLE
        }
        v => v,
    }
}
