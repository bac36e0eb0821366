//! Ensure-exists and merge of extracted build configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::document::{ConfigDocument, DocumentError, DOCUMENT_FILE_NAME};
use super::entry::ConfigurationEntry;
use crate::config::ToolchainSettings;
use crate::keil::ExtractedBuildConfig;

/// Name of the entry seeded into a new document on request
pub const DEFAULT_CONFIG_NAME: &str = "Default";

/// What a merge did to the target entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// An existing entry was updated in place
    Updated,
    /// No entry had the name, so one was appended
    Created,
}

/// Make sure `<dir>/c_cpp_properties.json` exists and return its path.
///
/// Creates `dir` if needed. A new document holds a single "Default" entry
/// when `create_default` is set and no entries otherwise. An existing
/// document is never touched.
pub fn ensure_document(
    dir: &Path,
    create_default: bool,
    settings: &ToolchainSettings,
) -> Result<PathBuf, DocumentError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(DOCUMENT_FILE_NAME);

    if path.exists() {
        debug!(path = %path.display(), "configuration document already exists");
        return Ok(path);
    }

    let entries = if create_default {
        vec![ConfigurationEntry::new(DEFAULT_CONFIG_NAME, settings)]
    } else {
        Vec::new()
    };
    ConfigDocument::new(entries).write_to_file(&path)?;
    info!(path = %path.display(), "created configuration document");

    Ok(path)
}

/// Write `data` into the entry named `config_name` of the document at
/// `document_path`.
///
/// Only `includePath` and `defines` of that entry change; other fields
/// and other entries are written back as they were. A missing entry is
/// appended with toolchain metadata from `settings`. Nothing is written
/// if the document is missing or malformed.
pub fn merge_build_config(
    data: &ExtractedBuildConfig,
    document_path: &Path,
    config_name: &str,
    settings: &ToolchainSettings,
) -> Result<MergeOutcome, DocumentError> {
    let mut document = ConfigDocument::load(document_path)?;

    let (index, outcome) = match document.position(config_name, document_path)? {
        Some(index) => (index, MergeOutcome::Updated),
        None => {
            warn!(name = %config_name, "configuration entry not found, creating it");
            let entry = ConfigurationEntry::new(config_name, settings);
            (document.push(&entry), MergeOutcome::Created)
        }
    };

    let entry = document
        .entry_mut(index)
        .ok_or_else(|| DocumentError::Malformed {
            path: document_path.to_path_buf(),
            reason: format!("configurations[{}] is not an object", index),
        })?;
    entry.insert("includePath".to_string(), string_array(&data.include_path));
    entry.insert("defines".to_string(), string_array(&data.defines));

    document.write_to_file(document_path)?;
    info!(
        name = %config_name,
        include_paths = data.include_path.len(),
        defines = data.defines.len(),
        "updated includePath and defines"
    );

    Ok(outcome)
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}
