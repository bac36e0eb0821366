//! Keil project file discovery
//!
//! Walks a source tree and picks the first `.uvprojx` file encountered.
//!
//! The walk is top-down: a directory's own files are visited before
//! anything inside its subdirectories. Within one directory entries keep
//! the filesystem's enumeration order.
//!
//! Known limitation: only one project is processed per run. That order is
//! platform dependent and NOT sorted, so with several project files at the
//! same level the one chosen is whichever the walk reaches first.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// File name suffix of Keil uVision 5 project descriptors
pub const PROJECT_SUFFIX: &str = ".uvprojx";

/// Locates Keil project files below a root directory
#[derive(Debug, Clone)]
pub struct ProjectLocator {
    /// File name suffix to match
    suffix: String,
    /// Visit directory entries in file name order
    sorted: bool,
}

impl Default for ProjectLocator {
    fn default() -> Self {
        Self::new(PROJECT_SUFFIX)
    }
}

impl ProjectLocator {
    /// Create a locator matching file names ending in `suffix`
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            sorted: false,
        }
    }

    /// Visit entries of each directory in file name order instead of
    /// filesystem order. Files still come before subdirectories.
    ///
    /// The pipeline never enables this; it exists for callers that need a
    /// reproducible choice between several project files.
    pub fn with_sorted_walk(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    fn walker(&self, root: &Path) -> WalkDir {
        let walker = WalkDir::new(root).follow_links(false);
        if self.sorted {
            walker.sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
        } else {
            // Stable sort: files keep their relative order
            walker.sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
        }
    }

    fn matches(&self, entry: &walkdir::DirEntry) -> bool {
        is_file(entry)
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(&self.suffix))
    }

    /// Walk `root`, skipping entries that cannot be read
    fn entries(&self, root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
        self.walker(root).into_iter().filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
    }

    /// Return every matching file, in walk order
    pub fn find_all(&self, root: &Path) -> Vec<PathBuf> {
        self.entries(root)
            .filter(|entry| self.matches(entry))
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    /// Return the first matching file, or `None` when the tree has none.
    ///
    /// A missing root is treated as an empty tree.
    pub fn find_first(&self, root: &Path) -> Option<PathBuf> {
        self.entries(root)
            .find(|entry| self.matches(entry))
            .map(walkdir::DirEntry::into_path)
    }
}

/// Regular file, or a symlink resolving to one
fn is_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Find the first `.uvprojx` file under `root` using the natural walk order
pub fn find_first_project(root: &Path) -> Option<PathBuf> {
    ProjectLocator::default().find_first(root)
}

/// Default configuration entry name for a project file: its file stem
pub fn project_config_name(project: &Path) -> Option<String> {
    project
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}
