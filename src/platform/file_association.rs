//! Per-user `.sn` association so double-clicking a note opens it here.
//!
//! Best-effort: every failure is logged at debug level and otherwise ignored.

use crate::storage::note_file::NOTE_EXTENSION;

pub const PROG_ID: &str = "CapsuleNotes.Note";
pub const PROG_DESCRIPTION: &str = "Capsule Notes sticky note";

/// Registry values written under `HKCU\Software\Classes`, as
/// (subkey, value) pairs for the default value of each key
pub fn association_entries(exe: &str) -> Vec<(String, String)> {
    vec![
        (format!(".{}", NOTE_EXTENSION), PROG_ID.to_string()),
        (PROG_ID.to_string(), PROG_DESCRIPTION.to_string()),
        (
            format!("{}\\shell\\open\\command", PROG_ID),
            format!("\"{}\" \"%1\"", exe),
        ),
    ]
}

#[cfg(target_os = "windows")]
pub fn register_note_extension() {
    use windows::core::{HSTRING, PCWSTR};
    use windows::Win32::System::Registry::{RegSetKeyValueW, HKEY_CURRENT_USER, REG_SZ};

    let exe = match std::env::current_exe() {
        Ok(path) => path.display().to_string(),
        Err(e) => {
            log::debug!("File association skipped, no exe path: {}", e);
            return;
        }
    };

    for (subkey, value) in association_entries(&exe) {
        let key = HSTRING::from(format!("Software\\Classes\\{}", subkey));
        let data: Vec<u8> = value
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        let result = unsafe {
            RegSetKeyValueW(
                HKEY_CURRENT_USER,
                &key,
                PCWSTR::null(),
                REG_SZ.0,
                Some(data.as_ptr().cast()),
                data.len() as u32,
            )
        };
        if let Err(e) = result.ok() {
            log::debug!("File association {} failed: {}", subkey, e);
            return;
        }
    }
    log::debug!("Registered .{} for {}", NOTE_EXTENSION, exe);
}

#[cfg(not(target_os = "windows"))]
pub fn register_note_extension() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_entries() {
        let entries = association_entries("C:\\Apps\\capsule-notes.exe");
        assert_eq!(entries[0], (".sn".to_string(), PROG_ID.to_string()));
        assert_eq!(entries[2].0, "CapsuleNotes.Note\\shell\\open\\command");
        assert_eq!(entries[2].1, "\"C:\\Apps\\capsule-notes.exe\" \"%1\"");
    }
}
