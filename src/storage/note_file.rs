//! Note files (`.sn`): a small pretty-printed JSON document.
//!
//! ```text
//! {
//!   "title": "Groceries",
//!   "content": "Buy milk",
//!   "geometry": [x, y, width, height]
//! }
//! ```
//!
//! There is no version field. Readers default every missing field and ignore
//! unknown ones, so files written by newer builds still open.

use crate::types::geometry::WindowGeometry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const NOTE_EXTENSION: &str = "sn";
pub const NOTE_FILTER_NAME: &str = "Sticky Note";

#[derive(Debug, Error)]
pub enum NoteFileError {
    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed note file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk shape of a note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Kept loose so a bad geometry entry doesn't reject the whole file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<serde_json::Value>,
}

impl NoteDocument {
    pub fn new(title: &str, content: &str, geometry: WindowGeometry) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            geometry: Some(serde_json::Value::from(geometry.to_array().to_vec())),
        }
    }

    /// Stored geometry, only when it is an array of exactly four integers
    pub fn geometry(&self) -> Option<WindowGeometry> {
        let values = self.geometry.as_ref()?.as_array()?;
        let ints: Option<Vec<i32>> = values
            .iter()
            .map(|v| v.as_i64().and_then(|n| i32::try_from(n).ok()))
            .collect();
        WindowGeometry::from_slice(&ints?)
    }
}

pub fn load(path: &Path) -> Result<NoteDocument, NoteFileError> {
    let text = fs::read_to_string(path).map_err(|source| NoteFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| NoteFileError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write (create or truncate) the document as indented UTF-8 JSON
pub fn save(path: &Path, document: &NoteDocument) -> Result<(), NoteFileError> {
    let text = serde_json::to_string_pretty(document).map_err(|source| NoteFileError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| NoteFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Chosen save paths without an extension get `.sn`
pub fn with_note_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(NOTE_EXTENSION)
    }
}
