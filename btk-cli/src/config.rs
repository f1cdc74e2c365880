//! Optional user config file with the default fetch options.
//!
//! Lives in `<config dir>/booru-toolkit/config.toml`, or in the directory set in the
//! `BTK_CONFIG_DIR` env var. A missing file means built-in defaults.
//!
//! ```toml
//! [defaults]
//! service = "auto"
//! image_size = "sample"
//! format_tags = true
//! trailing_comma = false
//! exclude_tags = true
//! excluded_tags = "text, dialogue"
//! ```
use std::{
    env,
    path::{Path, PathBuf},
};

use btk_common::{
    post::size::ImageSize,
    serde::{self, Deserialize, Serialize},
};
use btk_extractors::{registry::AUTO_SERVICE, tags::DEFAULT_EXCLUDED_TAGS};
use directories::ProjectDirs;
use log::debug;
use tokio::fs::{create_dir_all, read_to_string, write};

use crate::error::CliError;

pub const CONFIG_DIR_ENV: &str = "BTK_CONFIG_DIR";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(crate = "self::serde", default)]
pub struct Config {
    pub defaults: Defaults,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(crate = "self::serde", default)]
pub struct Defaults {
    pub service: String,
    pub image_size: ImageSize,
    pub format_tags: bool,
    pub trailing_comma: bool,
    pub exclude_tags: bool,
    pub excluded_tags: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            service: String::from(AUTO_SERVICE),
            image_size: ImageSize::default(),
            format_tags: true,
            trailing_comma: false,
            exclude_tags: true,
            excluded_tags: String::from(DEFAULT_EXCLUDED_TAGS),
        }
    }
}

/// Directory holding the config file.
///
/// Set the `BTK_CONFIG_DIR` env var to point it to a custom location.
pub fn config_dir() -> Result<PathBuf, CliError> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    ProjectDirs::from("com", "booru-toolkit", "booru-toolkit")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(CliError::NoConfigDir)
}

#[inline]
pub fn config_path() -> Result<PathBuf, CliError> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        let config = toml::from_str::<Self>(content)?;
        debug!("Config file decoded");
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reads the config file at the default location.
    pub async fn load() -> Result<Self, CliError> {
        Self::load_from(&config_path()?).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = read_to_string(path).await?;
        Self::from_toml(&content)
    }

    /// Writes the default config to `path`, creating its directory.
    pub async fn write_default(path: &Path) -> Result<(), CliError> {
        if let Some(dir) = path.parent() {
            create_dir_all(dir).await?;
        }

        write(path, Self::default().to_toml()?).await?;
        debug!("Default config written to {}", path.display());
        Ok(())
    }
}
