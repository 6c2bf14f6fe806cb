//! Sheet import/export as JSON files.
//!
//! # Responsibility
//! - Serialize the active tree to the pretty-printed interchange format.
//! - Parse user-supplied files back into a tree, with distinct rejection
//!   paths for unparseable text and wrong top-level shape.
//!
//! # Invariants
//! - Import never partially applies: it returns a full tree or an error.
//! - Export-then-import of an unchanged tree is identity.

use crate::model::sheet::Topic;
use log::info;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

/// Conventional file name for exported progress.
pub const EXPORT_FILE_NAME: &str = "question-sheet-progress.json";

/// Errors from sheet import.
///
/// `Parse` and `NotASequence` are deliberately distinct so callers can show
/// different user-facing messages for "not JSON" vs "wrong format".
#[derive(Debug)]
pub enum ImportError {
    /// The input is not parseable JSON, or records have wrong field types.
    Parse(serde_json::Error),
    /// The input parses but its top-level value is not a sequence.
    NotASequence,
    /// The input file could not be read.
    Io(std::io::Error),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid JSON: {err}"),
            Self::NotASequence => write!(f, "invalid sheet format: expected a top-level array"),
            Self::Io(err) => write!(f, "failed to read import file: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::NotASequence => None,
            Self::Io(err) => Some(err),
        }
    }
}

/// Serializes a tree to the interchange format (2-space indented JSON).
pub fn export_json(topics: &[Topic]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(topics)
}

/// Writes the interchange JSON to `path`.
pub fn export_to_file(topics: &[Topic], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let json = export_json(topics)?;
    fs::write(path.as_ref(), json).map_err(ExportError::Io)?;
    info!(
        "event=sheet_export module=exchange status=ok path={}",
        path.as_ref().display()
    );
    Ok(())
}

/// Errors from sheet export.
#[derive(Debug)]
pub enum ExportError {
    /// The tree could not be serialized.
    Serialize(serde_json::Error),
    /// The output file could not be written.
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize sheet: {err}"),
            Self::Io(err) => write!(f, "failed to write export file: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Parses interchange JSON into a tree.
///
/// The top-level value must be a sequence; anything else is rejected before
/// any record-level decoding happens.
pub fn import_json(text: &str) -> Result<Vec<Topic>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    if !value.is_array() {
        return Err(ImportError::NotASequence);
    }
    serde_json::from_value(value).map_err(ImportError::Parse)
}

/// Reads and parses an interchange file.
pub fn import_from_file(path: impl AsRef<Path>) -> Result<Vec<Topic>, ImportError> {
    let text = fs::read_to_string(path.as_ref()).map_err(ImportError::Io)?;
    let topics = import_json(&text)?;
    info!(
        "event=sheet_import module=exchange status=ok path={} topics={}",
        path.as_ref().display(),
        topics.len()
    );
    Ok(topics)
}
