//! Toolchain settings resolution
//!
//! The toolchain metadata written into new configuration entries is
//! resolved from three layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Settings file (`--settings <file>` or `<src-dir>/keil2vscode.toml`)
//! 3. CLI flags

mod defaults;
mod merge;
mod settings;

pub use defaults::BuiltinDefaults;
pub use merge::{deep_merge, merge_layers};
pub use settings::{
    SettingsError, ToolchainOverrides, ToolchainSettings, SETTINGS_FILE_NAME,
};
