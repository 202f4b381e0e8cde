use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

/// Environment variable overriding the catalog database path
pub const DB_ENV_VAR: &str = "GALLERY_DB";
/// Environment variable overriding the dropdown options file path
pub const OPTIONS_ENV_VAR: &str = "GALLERY_OPTIONS";

const APP_DIR: &str = "painting-gallery";

/// Where the gallery keeps its files.
///
/// Precedence: command line flags, then environment variables, then
/// the config file, then defaults in the user data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub options_path: PathBuf,
}

impl Config {
    /// Load the config file if there is one, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default_config()?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Self::default_config()
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `~/.config/painting-gallery/config.json` on Linux
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Override paths from the environment. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(db) = lookup(DB_ENV_VAR).filter(|v| !v.is_empty()) {
            self.db_path = PathBuf::from(db);
        }
        if let Some(options) = lookup(OPTIONS_ENV_VAR).filter(|v| !v.is_empty()) {
            self.options_path = PathBuf::from(options);
        }
    }

    /// Defaults under the user data directory:
    /// - Linux: ~/.local/share/painting-gallery/
    /// - macOS: ~/Library/Application Support/painting-gallery/
    /// - Windows: %APPDATA%\painting-gallery\
    fn default_config() -> Result<Self> {
        let dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| GalleryError::Config("could not determine user data directory".into()))?
            .join(APP_DIR);

        Ok(Self::in_dir(&dir))
    }

    /// Both files side by side in `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join("paintings.db"),
            options_path: dir.join("dropdown_options.json"),
        }
    }
}
