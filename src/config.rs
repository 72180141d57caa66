//! Configuration types for fbx2gltf-batch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for [`BatchConverter`](crate::BatchConverter)
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the FBX2glTF executable (auto-detected if None)
    #[serde(default)]
    pub converter_path: Option<PathBuf>,

    /// Whether to search PATH for the converter if no explicit path is set and no
    /// bundled copy sits next to the running executable (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Directory used when a batch has no output directory
    /// (default: the directory containing the running executable)
    #[serde(default)]
    pub default_output_dir: Option<PathBuf>,

    /// Capacity of the event broadcast channel (default: 1000)
    ///
    /// A subscriber that falls further behind than this receives
    /// `RecvError::Lagged`.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            converter_path: None,
            search_path: true,
            default_output_dir: None,
            event_buffer_size: default_event_buffer_size(),
        }
    }
}

impl Config {
    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise fail at runtime
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer_size == 0 {
            return Err(Error::Config {
                message: "event_buffer_size must be greater than zero".into(),
                key: Some("event_buffer_size".into()),
            });
        }
        if self
            .converter_path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(Error::Config {
                message: "converter_path must not be empty".into(),
                key: Some("converter_path".into()),
            });
        }
        Ok(())
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_event_buffer_size() -> usize {
    1000
}
