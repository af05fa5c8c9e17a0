use crate::report::ThemeName;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the cleaner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Output palette
    #[serde(default)]
    pub theme: ThemeName,

    /// Clear the terminal before printing the banner
    #[serde(default = "default_true")]
    pub clear_screen: bool,

    /// Wait for Enter before exiting
    #[serde(default = "default_true")]
    pub pause_on_exit: bool,

    /// Log skipped entries at debug level
    #[serde(default)]
    pub verbose: bool,

    /// Directory to clean instead of the host temp directory
    #[serde(default)]
    pub target: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::default(),
            clear_screen: true,
            pause_on_exit: true,
            verbose: false,
            target: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from file, or use the defaults if it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("temp-cleaner").join("config.toml")
        } else {
            PathBuf::from(".temp-cleaner.toml")
        }
    }

    /// Create the parent directory of `path` if it doesn't exist
    pub fn ensure_parent_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        Ok(())
    }
}
