pub mod note_file;

pub use note_file::{NoteDocument, NoteFileError};
