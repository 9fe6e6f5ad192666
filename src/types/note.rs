use super::geometry::WindowGeometry;
use crate::storage::note_file::NoteDocument;
use std::path::PathBuf;

/// Title given to notes created from the launcher
pub const DEFAULT_NOTE_TITLE: &str = "Sticky Note";

/// Snapshot of a sticky note, as saved and loaded
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub title: String,
    pub content: String,
    pub geometry: WindowGeometry,
    pub file_path: Option<PathBuf>,
}

impl Note {
    pub fn blank(geometry: WindowGeometry) -> Self {
        Self {
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: String::new(),
            geometry,
            file_path: None,
        }
    }

    pub fn to_document(&self) -> NoteDocument {
        NoteDocument::new(&self.title, &self.content, self.geometry)
    }

    /// Build from a loaded document. Stored geometry that does not fit `screen`
    /// is recentered; without stored geometry `fallback` is used as-is.
    pub fn from_document(
        document: NoteDocument,
        file_path: PathBuf,
        fallback: WindowGeometry,
        screen: &WindowGeometry,
    ) -> Self {
        let geometry = document
            .geometry()
            .map(|g| g.fit_to_screen(screen))
            .unwrap_or(fallback);
        Self {
            title: document.title,
            content: document.content,
            geometry,
            file_path: Some(file_path),
        }
    }
}
