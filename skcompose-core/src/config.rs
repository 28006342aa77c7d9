//! Configuration for column resolution.
//!
//! Uses `figment` for layered configuration: defaults -> user config -> workspace
//! config -> explicit file -> environment. The workspace file lives at
//! `.skcompose/config.toml`.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ComposeError, Result};
use crate::registry::{DataType, OpType};

/// Settings that shape how selectors and transformer references are resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Reserved token that excludes the selected columns.
    #[serde(default = "default_drop_token")]
    pub drop_token: String,
    /// Reserved token that forwards the selected columns verbatim.
    #[serde(default = "default_passthrough_token")]
    pub passthrough_token: String,
    /// Prefix of field names synthesized from positional selectors.
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,
    /// Data type given to lazily created fields.
    #[serde(default)]
    pub default_dtype: DataType,
    /// Operational type given to lazily created fields.
    #[serde(default)]
    pub default_optype: OpType,
    /// Accept selector lists that mix names and indices.
    #[serde(default)]
    pub allow_mixed_selectors: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            drop_token: default_drop_token(),
            passthrough_token: default_passthrough_token(),
            index_prefix: default_index_prefix(),
            default_dtype: DataType::default(),
            default_optype: OpType::default(),
            allow_mixed_selectors: false,
        }
    }
}

impl ComposeConfig {
    /// Field name synthesized for a zero-based raw column position.
    pub fn index_field_name(&self, index: usize) -> String {
        format!("{}{}", self.index_prefix, index + 1)
    }
}

fn default_drop_token() -> String {
    "drop".to_string()
}

fn default_passthrough_token() -> String {
    "passthrough".to_string()
}

fn default_index_prefix() -> String {
    "x".to_string()
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `SKCOMPOSE_`)
/// 2. Explicit config file
/// 3. Workspace-local config (`.skcompose/config.toml`)
/// 4. User config (`~/.config/skcompose/config.toml`)
/// 5. Built-in defaults
///
/// The user and workspace files are optional. An explicit file must exist.
pub fn load_config(workspace: Option<&Path>, file: Option<&Path>) -> Result<ComposeConfig> {
    let mut figment = Figment::from(Serialized::defaults(ComposeConfig::default()));

    if let Some(dirs) = directories::ProjectDirs::from("dev", "skcompose", "skcompose") {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = ws.join(".skcompose").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(file) = file {
        if !file.exists() {
            return Err(ComposeError::Config(format!(
                "config file not found: {}",
                file.display()
            )));
        }
        figment = figment.merge(Toml::file(file));
    }

    // SKCOMPOSE_INDEX_PREFIX, SKCOMPOSE_ALLOW_MIXED_SELECTORS, etc.
    figment = figment.merge(Env::prefixed("SKCOMPOSE_").split("__"));

    figment
        .extract()
        .map_err(|e| ComposeError::Config(e.to_string()))
}
