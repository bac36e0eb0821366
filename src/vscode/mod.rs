//! VS Code `c_cpp_properties.json` handling
//!
//! The document belongs to the user: this tool owns only the
//! `includePath` and `defines` of one named entry and round-trips
//! everything else untouched.

mod document;
mod entry;
mod merge;

pub use document::{ConfigDocument, DocumentError, DOCUMENT_FILE_NAME, DOCUMENT_VERSION};
pub use entry::ConfigurationEntry;
pub use merge::{ensure_document, merge_build_config, MergeOutcome, DEFAULT_CONFIG_NAME};
