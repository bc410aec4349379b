//! Workshop settings with persistence
//!
//! Settings are saved to `~/.config/gunsmith/settings.toml`

use std::fs;
use std::path::PathBuf;

use gunsmith_engine::{FramingConfig, StatBlock};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All workshop settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopSettings {
    pub camera: FramingConfig,
    /// Naked weapon stats
    pub stats: StatBlock,
    pub catalog: CatalogSettings,
}

impl WorkshopSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gunsmith"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No settings file found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse settings: {}, using defaults", e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML; missing sections and fields keep their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };

        let path = dir.join("settings.toml");

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Where attachments and their icons come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON catalog file; the built-in seed catalog is used when unset
    pub path: Option<PathBuf>,
    /// Directory holding `<icon token>.png` files
    pub icon_dir: PathBuf,
    /// Icon token used for empty or unknown tokens
    pub fallback_icon: Option<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: None,
            icon_dir: PathBuf::from("assets/icons"),
            fallback_icon: Some("ui_icon_att_missing".to_string()),
        }
    }
}
