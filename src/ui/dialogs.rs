// Native dialogs for the close/save flow and error reporting

use crate::storage::note_file::{NOTE_EXTENSION, NOTE_FILTER_NAME};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePrompt {
    Save,
    Discard,
    Cancel,
}

/// Blocking user prompts. Panels only talk to this trait so the close flow
/// can be driven headless.
pub trait Dialogs {
    /// "Save changes to <title>?" with Save / Discard / Cancel
    fn ask_save(&mut self, note_title: &str) -> SavePrompt;
    /// None when the user dismissed the chooser
    fn choose_save_path(&mut self, suggested_name: &str) -> Option<PathBuf>;
    fn warn(&mut self, title: &str, message: &str);
    fn error(&mut self, title: &str, message: &str);
}

pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn ask_save(&mut self, note_title: &str) -> SavePrompt {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Save note")
            .set_description(format!(
                "Save changes to \"{}\" before closing?\n\nYes saves, No discards.",
                note_title
            ))
            .set_buttons(MessageButtons::YesNoCancel)
            .show();
        match result {
            MessageDialogResult::Yes | MessageDialogResult::Ok => SavePrompt::Save,
            MessageDialogResult::No => SavePrompt::Discard,
            _ => SavePrompt::Cancel,
        }
    }

    fn choose_save_path(&mut self, suggested_name: &str) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Save note")
            .set_file_name(format!("{}.{}", suggested_name, NOTE_EXTENSION))
            .add_filter(NOTE_FILTER_NAME, &[NOTE_EXTENSION]);
        if let Some(documents) = dirs::document_dir() {
            dialog = dialog.set_directory(documents);
        }
        dialog.save_file()
    }

    fn warn(&mut self, title: &str, message: &str) {
        log::warn!("{}: {}", title, message);
        MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn error(&mut self, title: &str, message: &str) {
        log::error!("{}: {}", title, message);
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
