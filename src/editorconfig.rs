//! Optional `.editorconfig` for Keil source trees
//!
//! Keil writes CRLF files indented with spaces; the template makes the
//! editor keep doing the same.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the editorconfig artifact
pub const EDITORCONFIG_FILE_NAME: &str = ".editorconfig";

/// Template written verbatim
pub const EDITORCONFIG_TEMPLATE: &str = "# EditorConfig is awesome: https://EditorConfig.org

# top-most EditorConfig file
root = true

[*]
indent_style = space
indent_size = 4
end_of_line = crlf
trim_trailing_whitespace = true
insert_final_newline = true
";

/// Result of [`write_if_absent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorconfigOutcome {
    Written(PathBuf),
    AlreadyPresent(PathBuf),
}

/// Write the template to `<dir>/.editorconfig` unless that file exists
pub fn write_if_absent(dir: &Path) -> io::Result<EditorconfigOutcome> {
    let path = dir.join(EDITORCONFIG_FILE_NAME);
    if path.exists() {
        return Ok(EditorconfigOutcome::AlreadyPresent(path));
    }

    fs::write(&path, EDITORCONFIG_TEMPLATE)?;
    Ok(EditorconfigOutcome::Written(path))
}
