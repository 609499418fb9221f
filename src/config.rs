use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_NAME: &str = "bubblescope";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config {path}: `{field}` must be a positive number, got {value}")]
    NotPositive {
        path: PathBuf,
        field: &'static str,
        value: f64,
    },
}

/// Chart appearance settings.  Every field is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    /// Plot height in pixels.
    pub height: f64,
    /// Largest bubble size in pixels; the scale factor is `max / size_max²`.
    pub size_max: f64,
    /// Scale factor used when the bubbles yield none (no rows, no sizes).
    pub fallback_size_ref: f64,
    pub legend_title: String,
    pub reference: ReferenceMarkerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceMarkerConfig {
    pub name: String,
    pub fill: String,
    pub outline: String,
    pub outline_width: f64,
    pub size_min: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "📊 Product Quality vs List Price".to_string(),
            height: 900.0,
            size_max: 40.0,
            fallback_size_ref: 2.0,
            legend_title: "Position Category".to_string(),
            reference: ReferenceMarkerConfig::default(),
        }
    }
}

impl Default for ReferenceMarkerConfig {
    fn default() -> Self {
        Self {
            name: "Reference Marker Size: 15k Units".to_string(),
            fill: "#000000".to_string(),
            outline: "#ffffff".to_string(),
            outline_width: 1.0,
            size_min: 4.0,
        }
    }
}

impl ChartConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Scale settings must be finite and positive or no marker can be drawn.
    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let checks = [
            ("height", self.height),
            ("size_max", self.size_max),
            ("fallback_size_ref", self.fallback_size_ref),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive {
                    path: path.to_path_buf(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Explicit path if given, else the user config file if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => {
                log::info!("Using config {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/bubblescope/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join(CONFIG_FILE))
}
