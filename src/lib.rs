//! Keil to VS Code - sync uVision build settings into `c_cpp_properties.json`
//!
//! Reads the C compiler include paths and preprocessor defines from a
//! Keil `.uvprojx` project and writes them into one named entry of the
//! VS Code C/C++ extension's configuration document, leaving the rest of
//! the document alone.

pub mod config;
pub mod editorconfig;
pub mod keil;
pub mod logging;
pub mod pipeline;
pub mod vscode;

pub use config::{ToolchainOverrides, ToolchainSettings};
pub use keil::{ExtractError, ExtractedBuildConfig};
pub use pipeline::{run, PipelineError, PipelineOutcome, RunOptions};
pub use vscode::{ConfigDocument, ConfigurationEntry, DocumentError};
