use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use facemood_core::detection::infrastructure::onnx_yolo_locator::DEFAULT_CONFIDENCE;
use facemood_core::shared::constants::DEFAULT_CHAT_MODEL;

/// Persistent CLI defaults; command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub confidence: f64,
    pub chat_model: String,
    pub overlay_dir: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            overlay_dir: None,
            pretty: false,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceMood").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Falls back to defaults if the file is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed settings at {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}
