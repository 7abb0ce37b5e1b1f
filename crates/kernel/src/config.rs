use std::path::Path;

use gallery_common::CameraParams;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::scroll::ScrollConfig;

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Engine tuning. Every field falls back to its default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Shared by both scroll axes.
    pub scroll: ScrollConfig,
    pub camera: CameraParams,
}

impl GalleryConfig {
    /// Load from a JSON file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ease = self.scroll.ease;
        if !(ease > 0.0 && ease <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scroll.ease must be in (0, 1], got {ease}"
            )));
        }
        if !self.scroll.drag_multiplier.is_finite() {
            return Err(ConfigError::Invalid(
                "scroll.drag_multiplier must be finite".into(),
            ));
        }
        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {fov}"
            )));
        }
        if self.camera.distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera.distance must be positive, got {}",
                self.camera.distance
            )));
        }
        Ok(())
    }
}

/// Read any deserializable config section from a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let file = std::fs::File::open(path.as_ref())?;
    let value = serde_json::from_reader(std::io::BufReader::new(file))?;
    tracing::debug!(path = %path.as_ref().display(), "loaded config");
    Ok(value)
}
