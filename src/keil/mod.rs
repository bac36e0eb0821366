//! Keil uVision project handling
//!
//! Finds a `.uvprojx` descriptor in a source tree and reads the C
//! compiler's include paths and preprocessor defines from it.

mod extract;
mod locate;
mod normalize;

pub use extract::{extract_build_config, parse_build_config, ExtractError, ExtractedBuildConfig};
pub use locate::{find_first_project, project_config_name, ProjectLocator, PROJECT_SUFFIX};
pub use normalize::normalize_path;
