//! Persisted grid settings.
//!
//! Stored as JSON. Missing fields take their defaults from `constants.rs`,
//! so a settings file only needs the values it overrides.

use crate::constants::*;
use crate::data::DataResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "datagrid.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub row_number_column_width: u32,
    pub data_column_width: u32,
    pub min_viewport_dimension: f32,
    pub resize_debounce_ms: u64,
    pub header_height: u32,
    pub header_height_with_letter: u32,
    pub grid_border: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            row_number_column_width: ROW_NUMBER_COLUMN_WIDTH,
            data_column_width: DATA_COLUMN_WIDTH,
            min_viewport_dimension: MIN_VIEWPORT_DIMENSION,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            header_height: HEADER_HEIGHT,
            header_height_with_letter: HEADER_HEIGHT_WITH_LETTER,
            grid_border: GRID_BORDER,
        }
    }
}

impl GridSettings {
    /// Header row height for the current letter setting
    pub fn header_row_height(&self, show_letter: bool) -> u32 {
        if show_letter {
            self.header_height_with_letter
        } else {
            self.header_height
        }
    }

    pub fn load_from(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Load from the default location. A missing or unreadable file yields
    /// defaults.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> DataResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// `<config dir>/datagrid/datagrid.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("datagrid").join(SETTINGS_FILE))
}
