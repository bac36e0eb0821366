//! The `c_cpp_properties.json` document
//!
//! Held as a raw JSON object so unknown keys, unknown entry fields and
//! key order all survive a load/write cycle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::entry::ConfigurationEntry;

/// File name of the editor configuration document
pub const DOCUMENT_FILE_NAME: &str = "c_cpp_properties.json";

/// Schema version written into new documents
pub const DOCUMENT_VERSION: u64 = 4;

const CONFIGURATIONS: &str = "configurations";

/// Errors for loading, updating or writing the document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Configuration document not found: {0}")]
    Missing(PathBuf),

    #[error("Malformed configuration document {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An editor configuration document with a `configurations` list
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    /// Top-level object; its `configurations` slot is a placeholder that
    /// only keeps the key's position
    root: Map<String, Value>,
    configurations: Vec<Value>,
}

impl ConfigDocument {
    /// New document holding `entries` and the current schema version
    pub fn new(entries: Vec<ConfigurationEntry>) -> Self {
        let configurations = entries
            .iter()
            .map(|entry| Value::Object(entry.to_map()))
            .collect();

        let mut root = Map::new();
        root.insert(CONFIGURATIONS.to_string(), Value::Null);
        root.insert("version".to_string(), Value::from(DOCUMENT_VERSION));
        Self {
            root,
            configurations,
        }
    }

    /// Load a document, failing when it is absent or lacks a
    /// `configurations` list
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        if !path.exists() {
            return Err(DocumentError::Missing(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json, path)
    }

    /// Parse a document. `origin` only labels errors.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, DocumentError> {
        let malformed = |reason: String| DocumentError::Malformed {
            path: origin.to_path_buf(),
            reason,
        };

        let value: Value =
            serde_json::from_str(json).map_err(|e| malformed(format!("invalid JSON: {}", e)))?;
        let Value::Object(mut root) = value else {
            return Err(malformed("top level is not an object".to_string()));
        };
        let configurations = match root.get_mut(CONFIGURATIONS).map(std::mem::take) {
            Some(Value::Array(entries)) => entries,
            _ => return Err(malformed("missing 'configurations' list".to_string())),
        };

        Ok(Self {
            root,
            configurations,
        })
    }

    /// The `configurations` list
    pub fn configurations(&self) -> &[Value] {
        &self.configurations
    }

    /// Index of the first entry named `name`.
    ///
    /// Entries are scanned in order; a non-object met before the match
    /// makes the document malformed.
    pub fn position(&self, name: &str, origin: &Path) -> Result<Option<usize>, DocumentError> {
        for (index, entry) in self.configurations().iter().enumerate() {
            let Value::Object(fields) = entry else {
                return Err(DocumentError::Malformed {
                    path: origin.to_path_buf(),
                    reason: format!("configurations[{}] is not an object", index),
                });
            };
            if fields.get("name").and_then(Value::as_str) == Some(name) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Mutable access to the entry at `index`
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Map<String, Value>> {
        self.configurations
            .get_mut(index)
            .and_then(Value::as_object_mut)
    }

    /// Append a new entry, returning its index
    pub fn push(&mut self, entry: &ConfigurationEntry) -> usize {
        self.configurations.push(Value::Object(entry.to_map()));
        self.configurations.len() - 1
    }

    /// Serialize with 4-space indentation; non-ASCII is written verbatim
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut root = self.root.clone();
        root.insert(
            CONFIGURATIONS.to_string(),
            Value::Array(self.configurations.clone()),
        );

        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        root.serialize(&mut serializer)?;
        // serde_json only ever emits valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Write atomically to file (write-then-rename)
    pub fn write_to_file(&self, path: &Path) -> Result<(), DocumentError> {
        let json = self.to_json()?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &json)?;

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolchainSettings;
    use serde_json::json;
    use tempfile::TempDir;

    fn origin() -> &'static Path {
        Path::new("c_cpp_properties.json")
    }

    #[test]
    fn test_new_document_shape() {
        let entry = ConfigurationEntry::new("Default", &ToolchainSettings::default());
        let doc = ConfigDocument::new(vec![entry]);
        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(value["version"], 4);
        assert_eq!(value["configurations"][0]["name"], "Default");
        assert_eq!(value["configurations"][0]["includePath"], json!([]));
    }

    #[test]
    fn test_empty_document_shape() {
        let doc = ConfigDocument::new(Vec::new());
        assert_eq!(
            doc.to_json().unwrap(),
            "{\n    \"configurations\": [],\n    \"version\": 4\n}"
        );
    }

    #[test]
    fn test_rejects_invalid_json() {
        let result = ConfigDocument::from_json("{ not json", origin());
        assert!(matches!(result, Err(DocumentError::Malformed { .. })));
    }

    #[test]
    fn test_rejects_missing_configurations() {
        for json in [r#"{"version": 4}"#, r#"{"configurations": {}}"#, "[]"] {
            let result = ConfigDocument::from_json(json, origin());
            assert!(
                matches!(result, Err(DocumentError::Malformed { .. })),
                "accepted: {}",
                json
            );
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDocument::load(&dir.path().join(DOCUMENT_FILE_NAME));
        assert!(matches!(result, Err(DocumentError::Missing(_))));
    }

    #[test]
    fn test_position_first_match() {
        let doc = ConfigDocument::from_json(
            r#"{"configurations": [{"name": "A"}, {"name": "B", "n": 1}, {"name": "B", "n": 2}]}"#,
            origin(),
        )
        .unwrap();

        assert_eq!(doc.position("B", origin()).unwrap(), Some(1));
        assert_eq!(doc.position("C", origin()).unwrap(), None);
    }

    #[test]
    fn test_position_non_object_entry() {
        let doc = ConfigDocument::from_json(
            r#"{"configurations": ["oops", {"name": "A"}]}"#,
            origin(),
        )
        .unwrap();
        assert!(matches!(
            doc.position("A", origin()),
            Err(DocumentError::Malformed { .. })
        ));
    }

    #[test]
    fn test_round_trip_preserves_keys_and_order() {
        let json = r#"{
    "env": {
        "myRoot": "${workspaceFolder}"
    },
    "configurations": [
        {
            "name": "Bar",
            "extra": 1,
            "browse": {
                "path": ["${workspaceFolder}"]
            }
        }
    ],
    "version": 4,
    "enableConfigurationSquiggles": true
}"#;
        let doc = ConfigDocument::from_json(json, origin()).unwrap();
        let reparsed = ConfigDocument::from_json(&doc.to_json().unwrap(), origin()).unwrap();
        assert_eq!(doc, reparsed);

        let keys: Vec<&String> = doc.root.keys().collect();
        assert_eq!(
            keys,
            vec!["env", "configurations", "version", "enableConfigurationSquiggles"]
        );
    }

    #[test]
    fn test_non_ascii_written_verbatim() {
        let mut entry = ConfigurationEntry::new("工程", &ToolchainSettings::default());
        entry.include_path = vec!["驱动/inc".to_string()];
        let json = ConfigDocument::new(vec![entry]).to_json().unwrap();

        assert!(json.contains("\"工程\""));
        assert!(json.contains("\"驱动/inc\""));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_write_to_file_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DOCUMENT_FILE_NAME);

        ConfigDocument::new(Vec::new()).write_to_file(&path).unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(ConfigDocument::load(&path).is_ok());
    }

    #[test]
    fn test_failed_rename_removes_temp() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory in the way makes the rename fail
        let path = dir.path().join(DOCUMENT_FILE_NAME);
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let result = ConfigDocument::new(Vec::new()).write_to_file(&path);

        assert!(matches!(result, Err(DocumentError::Io(_))));
        assert!(!path.with_extension("json.tmp").exists());
        assert!(path.is_dir());
    }
}
