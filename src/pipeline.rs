//! Sync orchestration
//!
//! One linear pass, aborting at the first failure:
//! 1. Optionally write `.editorconfig` into the source directory
//! 2. Locate the first `.uvprojx` (none found ends the run normally)
//! 3. Pick the configuration name (explicit, or the project file stem)
//! 4. Extract include paths and defines
//! 5. Ensure `c_cpp_properties.json` exists
//! 6. Merge
//!
//! The document is only written once a complete replacement is built, so
//! an aborted run never leaves it half-updated.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{SettingsError, ToolchainSettings};
use crate::editorconfig::{self, EditorconfigOutcome};
use crate::keil::{self, ExtractError, ProjectLocator};
use crate::vscode::{self, DocumentError, MergeOutcome};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to parse Keil project file: {0}")]
    Extract(#[from] ExtractError),

    #[error("configuration document error: {0}")]
    Document(#[from] DocumentError),

    #[error("cannot derive a configuration name from {0}")]
    NoConfigName(PathBuf),
}

impl PipelineError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Settings(_) => 2,
            PipelineError::Extract(_) => 3,
            PipelineError::NoConfigName(_) => 3,
            PipelineError::Document(_) => 4,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory searched for the project file
    pub src_dir: PathBuf,

    /// Directory holding `c_cpp_properties.json`
    pub vscode_dir: PathBuf,

    /// Entry name; defaults to the project file stem
    pub config_name: Option<String>,

    /// Write `.editorconfig` into `src_dir` if absent
    pub create_editorconfig: bool,

    /// Seed a "Default" entry when the document is created
    pub create_default_config: bool,

    /// Toolchain metadata for entries this run creates
    pub toolchain: ToolchainSettings,
}

impl RunOptions {
    /// Options for `src_dir` with the output in `<src_dir>/.vscode`
    pub fn new(src_dir: impl Into<PathBuf>) -> Self {
        let src_dir = src_dir.into();
        Self {
            vscode_dir: src_dir.join(".vscode"),
            src_dir,
            config_name: None,
            create_editorconfig: false,
            create_default_config: false,
            toolchain: ToolchainSettings::default(),
        }
    }

    pub fn with_vscode_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vscode_dir = dir.into();
        self
    }

    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = Some(name.into());
        self
    }

    pub fn with_editorconfig(mut self, create: bool) -> Self {
        self.create_editorconfig = create;
        self
    }

    pub fn with_default_config(mut self, create: bool) -> Self {
        self.create_default_config = create;
        self
    }

    pub fn with_toolchain(mut self, toolchain: ToolchainSettings) -> Self {
        self.toolchain = toolchain;
        self
    }
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The source tree has no project file; nothing was done
    NoProjectFile,

    /// The named entry was written
    Synced {
        project: PathBuf,
        document: PathBuf,
        config_name: String,
        merge: MergeOutcome,
    },
}

/// Run the full sync
pub fn run(options: &RunOptions) -> PipelineResult<PipelineOutcome> {
    if options.create_editorconfig {
        write_editorconfig(&options.src_dir);
    }

    let Some(project) = ProjectLocator::default().find_first(&options.src_dir) else {
        warn!(dir = %options.src_dir.display(), "no .uvprojx file found");
        return Ok(PipelineOutcome::NoProjectFile);
    };

    let config_name = match &options.config_name {
        Some(name) => name.clone(),
        None => keil::project_config_name(&project).ok_or_else(|| {
            error!(path = %project.display(), "cannot derive a configuration name");
            PipelineError::NoConfigName(project.clone())
        })?,
    };
    info!(path = %project.display(), "parsing project file");
    info!(name = %config_name, "target configuration");

    let data = keil::extract_build_config(&project, &config_name).map_err(|e| {
        error!(path = %project.display(), error = %e, "failed to parse Keil project file");
        PipelineError::from(e)
    })?;

    let document = vscode::ensure_document(
        &options.vscode_dir,
        options.create_default_config,
        &options.toolchain,
    )
    .map_err(|e| log_document_error(&options.vscode_dir, e))?;

    let merge = vscode::merge_build_config(&data, &document, &config_name, &options.toolchain)
        .map_err(|e| log_document_error(&document, e))?;

    info!("done");
    Ok(PipelineOutcome::Synced {
        project,
        document,
        config_name,
        merge,
    })
}

/// The editorconfig is a courtesy; failing to write it does not abort
fn write_editorconfig(dir: &Path) {
    match editorconfig::write_if_absent(dir) {
        Ok(EditorconfigOutcome::Written(path)) => {
            info!(path = %path.display(), "wrote .editorconfig");
        }
        Ok(EditorconfigOutcome::AlreadyPresent(path)) => {
            info!(path = %path.display(), ".editorconfig already exists, skipping");
        }
        Err(e) => {
            error!(dir = %dir.display(), error = %e, "failed to write .editorconfig");
        }
    }
}

fn log_document_error(path: &Path, e: DocumentError) -> PipelineError {
    error!(path = %path.display(), error = %e, "failed to update configuration document");
    PipelineError::from(e)
}
