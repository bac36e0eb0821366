//! Resolved toolchain settings
//!
//! Replaces a hardcoded compiler path with a value threaded explicitly
//! into the components that write configuration entries.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// Settings file looked up in the source directory when none is given
pub const SETTINGS_FILE_NAME: &str = "keil2vscode.toml";

/// Errors raised while resolving toolchain settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Toolchain metadata written into configuration entries this tool creates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSettings {
    pub compiler_path: String,
    pub intellisense_mode: String,
    pub c_standard: String,
    pub cpp_standard: String,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            compiler_path: defaults.compiler_path,
            intellisense_mode: defaults.intellisense_mode,
            c_standard: defaults.c_standard,
            cpp_standard: defaults.cpp_standard,
        }
    }
}

/// Per-field overrides from the command line (layer 3)
#[derive(Debug, Clone, Default)]
pub struct ToolchainOverrides {
    pub compiler_path: Option<String>,
    pub intellisense_mode: Option<String>,
    pub c_standard: Option<String>,
    pub cpp_standard: Option<String>,
}

impl ToolchainOverrides {
    /// Convert to the layered settings shape, omitting unset fields
    pub fn to_value(&self) -> Value {
        let mut toolchain = serde_json::Map::new();
        let fields = [
            ("compiler_path", &self.compiler_path),
            ("intellisense_mode", &self.intellisense_mode),
            ("c_standard", &self.c_standard),
            ("cpp_standard", &self.cpp_standard),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                toolchain.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        let mut root = serde_json::Map::new();
        root.insert("toolchain".to_string(), Value::Object(toolchain));
        Value::Object(root)
    }
}

impl ToolchainSettings {
    /// Resolve settings from the built-in defaults, an optional settings
    /// file and CLI overrides.
    ///
    /// An explicit `settings_file` must exist. Otherwise
    /// `<src_dir>/keil2vscode.toml` is used when present.
    pub fn resolve(
        src_dir: &Path,
        settings_file: Option<&Path>,
        overrides: &ToolchainOverrides,
    ) -> Result<Self, SettingsError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];

        match settings_file {
            Some(path) => {
                if !path.exists() {
                    return Err(SettingsError::NotFound(path.to_path_buf()));
                }
                layers.push(Self::load_toml_file(path)?);
            }
            None => {
                let path = src_dir.join(SETTINGS_FILE_NAME);
                if path.is_file() {
                    layers.push(Self::load_toml_file(&path)?);
                }
            }
        }

        layers.push(overrides.to_value());

        let merged = merge_layers(layers);
        let toolchain = merged.get("toolchain").cloned().unwrap_or(Value::Null);
        let settings: ToolchainSettings = serde_json::from_value(toolchain)
            .map_err(|e| SettingsError::Invalid(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load a TOML settings file as a JSON value
    fn load_toml_file(path: &Path) -> Result<Value, SettingsError> {
        debug!(path = %path.display(), "loading settings file");
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse settings TOML into the layered shape
    pub fn parse(content: &str) -> Result<Value, SettingsError> {
        let value: Value = toml::from_str(content)?;
        match value.get("toolchain") {
            None | Some(Value::Object(_)) => Ok(value),
            Some(_) => Err(SettingsError::Invalid(
                "'toolchain' must be a table".to_string(),
            )),
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("compiler_path", &self.compiler_path),
            ("intellisense_mode", &self.intellisense_mode),
            ("c_standard", &self.c_standard),
            ("cpp_standard", &self.cpp_standard),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(SettingsError::Invalid(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }
}
