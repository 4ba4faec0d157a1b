//! Loader configuration
//!
//! Read from `<mods>/DialogLoader/config.toml`. Every field is optional; a
//! missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Name of the loader's folder inside the mods directory
pub const LOADER_DIR: &str = "DialogLoader";

/// Name of the dialog source tree inside [`LOADER_DIR`]
pub const DIALOG_DIR: &str = "dialog";

/// Name of the config file inside [`LOADER_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}

/// User-tunable loader settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Maximum log level: `off`, `error`, `warn`, `info`, `debug` or `trace`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log a warning when a count, a line, or a whole blob has to be truncated
    #[serde(default = "default_true")]
    pub warn_on_truncation: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            warn_on_truncation: true,
        }
    }
}

impl LoaderConfig {
    /// Parse a config from TOML text
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] if the text is not valid TOML or a field has the wrong type.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load the config under `mod_root`, falling back to defaults.
    ///
    /// A missing file is normal. An unreadable or malformed file is logged
    /// and ignored.
    pub fn load_or_default(mod_root: &Path) -> Self {
        let path = mod_root.join(LOADER_DIR).join(CONFIG_FILE);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_toml(&text) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
