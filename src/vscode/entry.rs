//! Configuration entries created by this tool

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ToolchainSettings;

/// A `configurations[]` entry as this tool writes it.
///
/// Existing entries are never round-tripped through this type, since they
/// may carry fields it does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationEntry {
    pub name: String,

    #[serde(rename = "intelliSenseMode")]
    pub intellisense_mode: String,

    #[serde(rename = "compilerPath")]
    pub compiler_path: String,

    #[serde(rename = "cStandard")]
    pub c_standard: String,

    #[serde(rename = "cppStandard")]
    pub cpp_standard: String,

    #[serde(rename = "includePath", default)]
    pub include_path: Vec<String>,

    #[serde(default)]
    pub defines: Vec<String>,
}

impl ConfigurationEntry {
    /// Entry with the given name, toolchain metadata from `settings` and
    /// empty include paths and defines
    pub fn new(name: impl Into<String>, settings: &ToolchainSettings) -> Self {
        Self {
            name: name.into(),
            intellisense_mode: settings.intellisense_mode.clone(),
            compiler_path: settings.compiler_path.clone(),
            c_standard: settings.c_standard.clone(),
            cpp_standard: settings.cpp_standard.clone(),
            include_path: Vec::new(),
            defines: Vec::new(),
        }
    }

    /// Convert to a JSON object, keys in editor order
    pub fn to_map(&self) -> Map<String, Value> {
        let strings = |items: &[String]| {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        };

        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert(
            "intelliSenseMode".to_string(),
            Value::String(self.intellisense_mode.clone()),
        );
        map.insert(
            "compilerPath".to_string(),
            Value::String(self.compiler_path.clone()),
        );
        map.insert("cStandard".to_string(), Value::String(self.c_standard.clone()));
        map.insert(
            "cppStandard".to_string(),
            Value::String(self.cpp_standard.clone()),
        );
        map.insert("includePath".to_string(), strings(&self.include_path));
        map.insert("defines".to_string(), strings(&self.defines));
        map
    }
}
