//! Native message boxes via `rfd`

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

use crate::core::hotkey::Chord;

static HOTKEY_WARNINGS: WarningLatch = WarningLatch::new();

/// Remembers which chords the user was already warned about
struct WarningLatch {
    warned: Mutex<BTreeSet<String>>,
}

impl WarningLatch {
    const fn new() -> Self {
        Self {
            warned: Mutex::new(BTreeSet::new()),
        }
    }

    fn warned(&self) -> MutexGuard<'_, BTreeSet<String>> {
        match self.warned.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// True the first time `chord` fails since it last registered
    fn should_warn(&self, chord: &Chord) -> bool {
        self.warned().insert(chord.to_string())
    }

    fn reset(&self, chord: &Chord) {
        self.warned().remove(&chord.to_string());
    }
}

fn hotkey_failure_text(chord: &Chord) -> String {
    format!(
        "Could not register the global hotkey ({chord}).\n\
         Please grant accessibility permissions:\n\n\
         1. Open System Settings > Privacy & Security\n\
         2. Select 'Accessibility'\n\
         3. Enable clipstack\n\
         4. Restart the application\n\n\
         You can still open the clipboard history from the tray icon."
    )
}

/// Warn that the hotkey could not be registered. Shown once per chord until
/// that chord registers again.
pub fn warn_hotkey_unavailable(chord: &Chord) {
    if !HOTKEY_WARNINGS.should_warn(chord) {
        tracing::debug!(%chord, "hotkey warning already shown");
        return;
    }

    let text = hotkey_failure_text(chord);
    tauri::async_runtime::spawn(async move {
        AsyncMessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Hotkey Setup Required")
            .set_description(text)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    });
}

/// Re-arm the warning after `chord` registered
pub fn hotkey_registered(chord: &Chord) {
    HOTKEY_WARNINGS.reset(chord);
}

/// Ask before wiping the history
pub async fn confirm_clear_history() -> bool {
    let answer = AsyncMessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Clear History")
        .set_description("Are you sure you want to clear all clipboard history?")
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;
    matches!(answer, MessageDialogResult::Yes)
}

fn about_text(chord: &Chord) -> String {
    format!(
        "clipstack {}\n\
         A clipboard history manager for the menu bar.\n\n\
         Current hotkey: {chord}\n\n\
         Copy text as usual, press the hotkey, pick an entry and it is pasted \
         into the app you were using.",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn show_about(chord: &Chord) {
    let text = about_text(chord);
    tauri::async_runtime::spawn(async move {
        AsyncMessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("About clipstack")
            .set_description(text)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    });
}
