pub mod file_association;

pub use file_association::register_note_extension;
