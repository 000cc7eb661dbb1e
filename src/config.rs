//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: explicit path, else `$XDG_CONFIG_HOME/behavior-tree-view/tree-view.toml`
//! 3. Environment variables: `BTV_*` prefix (`__` separates nested keys,
//!    e.g. `BTV_TEST_DATA_COUNT`, `BTV_SEARCH__CASE_SENSITIVE`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};

/// Generic data key drag payloads are tagged with.
pub const DRAG_DATA_FLAG: &str = "BaseTreeViewItem";

/// Search filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SearchSettings {
    /// Match labels case-sensitively (default: false)
    pub case_sensitive: bool,
}

/// Drag-and-drop settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DragSettings {
    /// Tag that marks a drag payload as originating from a tree view
    pub data_flag: String,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            data_flag: DRAG_DATA_FLAG.into(),
        }
    }
}

/// Unified configuration for the tree view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Label of the synthetic root node
    pub root_label: String,
    /// Number of sequential items the test-data population creates
    pub test_data_count: usize,
    pub search: SearchSettings,
    pub drag: DragSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_label: "Root".into(),
            test_data_count: 5000,
            search: SearchSettings::default(),
            drag: DragSettings::default(),
        }
    }
}

/// Raw settings for intermediate parsing; `None` means "inherit".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_label: Option<String>,
    pub test_data_count: Option<usize>,
    pub search: RawSearchSettings,
    pub drag: RawDragSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSearchSettings {
    pub case_sensitive: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDragSettings {
    pub data_flag: Option<String>,
}

/// Get the XDG config directory.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "behavior-tree-view").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tree-view.toml"))
}

fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
            test_data_count: overlay.test_data_count.unwrap_or(self.test_data_count),
            search: SearchSettings {
                case_sensitive: overlay
                    .search
                    .case_sensitive
                    .unwrap_or(self.search.case_sensitive),
            },
            drag: DragSettings {
                data_flag: overlay
                    .drag
                    .data_flag
                    .clone()
                    .unwrap_or_else(|| self.drag.data_flag.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the global file is optional.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            debug!(path = %path.display(), "loading config file");
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply BTV_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("BTV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("root_label") {
            settings.root_label = val;
        }
        if let Ok(val) = config.get::<usize>("test_data_count") {
            settings.test_data_count = val;
        }
        if let Ok(val) = config.get_bool("search.case_sensitive") {
            settings.search.case_sensitive = val;
        }
        if let Ok(val) = config.get_string("drag.data_flag") {
            settings.drag.data_flag = val;
        }

        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
