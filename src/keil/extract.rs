//! Build configuration extraction from `.uvprojx` descriptors
//!
//! A uVision project keeps the C/C++ compiler settings under
//! `Targets/Target/TargetOption/TargetArmAds/Cads`. Only two fields are
//! read from it:
//!
//! ```xml
//! <Cads>
//!   <VariousControls>
//!     <Define>USE_HAL_DRIVER,STM32F407xx</Define>
//!     <IncludePath>..\Core\Inc;..\Drivers\CMSIS\Include</IncludePath>
//!   </VariousControls>
//! </Cads>
//! ```
//!
//! The document is streamed with `quick-xml`. The whole document must be
//! well-formed even though the interesting part usually sits near the top:
//! one document element, checked attributes, nothing but whitespace,
//! comments and processing instructions around it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalize::normalize_path;

/// Compiler settings node
const CADS: &[u8] = b"Cads";

/// Parent of the two fields read
const VARIOUS_CONTROLS: &[u8] = b"VariousControls";

const INCLUDE_PATH: &[u8] = b"IncludePath";
const DEFINE: &[u8] = b"Define";

/// Include paths and preprocessor symbols read from a project file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedBuildConfig {
    /// Normalized include paths, in project order (duplicates kept)
    pub include_path: Vec<String>,

    /// Preprocessor symbols, in project order
    pub defines: Vec<String>,
}

impl ExtractedBuildConfig {
    /// Build from the raw `IncludePath` and `Define` texts
    pub fn from_fields(include_path: Option<&str>, define: Option<&str>) -> Self {
        Self {
            include_path: include_path
                .map(|text| split_field(text, ';').map(normalize_path).collect())
                .unwrap_or_default(),
            defines: define
                .map(|text| split_field(text, ',').map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

/// Split on `delimiter`, trim every piece and drop the empty ones
fn split_field(text: &str, delimiter: char) -> impl Iterator<Item = &str> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
}

/// Errors raised while extracting a project's build configuration
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Project file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read project file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("XML parse error in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    #[error("No <Cads> compiler settings in {0}")]
    MissingCompilerSettings(PathBuf),
}

/// Extract include paths and defines from a `.uvprojx` file.
///
/// `config_name` is only the label the result will be merged under; it
/// does not influence what gets extracted.
pub fn extract_build_config(
    path: &Path,
    config_name: &str,
) -> Result<ExtractedBuildConfig, ExtractError> {
    debug!(path = %path.display(), config = %config_name, "reading project file");

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExtractError::NotFound(path.to_path_buf()),
        _ => ExtractError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    parse_build_config(&bytes, path)
}

/// Which of the two fields is collecting text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    IncludePath,
    Define,
}

/// Streaming state while walking the document
#[derive(Debug, Default)]
struct Scan {
    /// Names of the currently open elements, root first
    stack: Vec<Vec<u8>>,
    /// Depth of the open `<Cads>` element
    cads_depth: Option<usize>,
    cads_found: bool,
    /// Field whose leading text is being collected, and its depth
    capture: Option<(Field, usize)>,
    include_path: Option<String>,
    define: Option<String>,
    root_seen: bool,
    /// The document element has been closed
    root_closed: bool,
}

impl Scan {
    /// Handle an opening tag. Returns the depth the element now occupies.
    fn open(&mut self, name: &[u8]) -> usize {
        let depth = self.stack.len() + 1;

        // Text after a child element is not part of the field's own text
        if matches!(self.capture, Some((_, d)) if d + 1 == depth) {
            self.capture = None;
        }

        if self.cads_depth.is_some() {
            let under_various = self.stack.last().map(Vec::as_slice) == Some(VARIOUS_CONTROLS);
            if under_various && name == INCLUDE_PATH && self.include_path.is_none() {
                self.include_path = Some(String::new());
                self.capture = Some((Field::IncludePath, depth));
            } else if under_various && name == DEFINE && self.define.is_none() {
                self.define = Some(String::new());
                self.capture = Some((Field::Define, depth));
            }
        } else if !self.cads_found && !self.stack.is_empty() && name == CADS {
            self.cads_found = true;
            self.cads_depth = Some(depth);
        }

        self.root_seen = true;
        depth
    }

    fn close(&mut self, depth: usize) {
        if matches!(self.capture, Some((_, d)) if d == depth) {
            self.capture = None;
        }
        if self.cads_depth == Some(depth) {
            self.cads_depth = None;
        }
        if depth == 1 {
            self.root_closed = true;
        }
    }

    /// Outside the document element only whitespace is allowed
    fn outside_root(&self) -> bool {
        self.stack.is_empty()
    }

    fn text(&mut self, text: &str) {
        let target = match self.capture {
            Some((Field::IncludePath, d)) if d == self.stack.len() => &mut self.include_path,
            Some((Field::Define, d)) if d == self.stack.len() => &mut self.define,
            _ => return,
        };
        if let Some(buf) = target {
            buf.push_str(text);
        }
    }
}

/// Extract the build configuration from raw project XML.
///
/// `path` is only used to label errors.
pub fn parse_build_config(xml: &[u8], path: &Path) -> Result<ExtractedBuildConfig, ExtractError> {
    let xml_error = |message: String| ExtractError::Xml {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut scan = Scan::default();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(format!("at byte {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(e) => {
                check_start(&e, &scan).map_err(xml_error)?;
                let name = e.name().as_ref().to_vec();
                scan.open(&name);
                scan.stack.push(name);
            }
            Event::Empty(e) => {
                check_start(&e, &scan).map_err(xml_error)?;
                let depth = scan.open(e.name().as_ref());
                scan.close(depth);
            }
            Event::End(_) => {
                let depth = scan.stack.len();
                if depth == 0 {
                    return Err(xml_error("unexpected closing tag".to_string()));
                }
                scan.close(depth);
                scan.stack.pop();
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| xml_error(e.to_string()))?;
                if scan.outside_root() && !text.trim_start_matches('\u{feff}').trim().is_empty() {
                    return Err(xml_error("text outside the document element".to_string()));
                }
                scan.text(&text);
            }
            Event::CData(c) => {
                if scan.outside_root() {
                    return Err(xml_error("CDATA outside the document element".to_string()));
                }
                let text = reader
                    .decoder()
                    .decode(&c)
                    .map_err(|e| xml_error(e.to_string()))?;
                scan.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if !scan.root_seen {
        return Err(xml_error("no element found".to_string()));
    }
    if let Some(open) = scan.stack.last() {
        return Err(xml_error(format!(
            "unclosed element <{}>",
            String::from_utf8_lossy(open)
        )));
    }
    if !scan.cads_found {
        return Err(ExtractError::MissingCompilerSettings(path.to_path_buf()));
    }

    Ok(ExtractedBuildConfig::from_fields(
        scan.include_path.as_deref(),
        scan.define.as_deref(),
    ))
}

/// Reject a second document element and malformed attributes
fn check_start(start: &BytesStart<'_>, scan: &Scan) -> Result<(), String> {
    if scan.root_closed {
        return Err(format!(
            "element <{}> after the document element",
            String::from_utf8_lossy(start.name().as_ref())
        ));
    }
    for attr in start.attributes().with_checks(true) {
        attr.map_err(|e| e.to_string())?;
    }
    Ok(())
}
