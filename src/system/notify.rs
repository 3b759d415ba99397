//! Banner notifications via `tauri-plugin-notification`

use tauri::AppHandle;
use tauri_plugin_notification::NotificationExt;

use crate::core::hotkey::{Chord, HotkeyPreset};
use crate::core::placement::PickerPlacement;

const STATUS_TITLE: &str = "clipstack";

pub fn welcome_text(chord: &Chord) -> String {
    format!("Press {chord} to open clipboard history or right-click this icon.")
}

pub fn placement_text(placement: PickerPlacement) -> &'static str {
    match placement {
        PickerPlacement::MouseRelative => "Window will appear near mouse cursor",
        PickerPlacement::MenuBar => "Window will appear near menu bar",
        PickerPlacement::Center => "Window will appear in screen center",
    }
}

/// Confirmation for a hotkey menu pick; `changed` is false when `preset`
/// was already active
pub fn hotkey_text(preset: HotkeyPreset, changed: bool) -> String {
    let chord = preset.chord();
    match (changed, preset) {
        (false, _) => format!("Already using {chord} hotkey"),
        (true, HotkeyPreset::Standard) => format!("Switched to {chord} hotkey"),
        (true, HotkeyPreset::Alternative) => format!("Switched to {chord} hotkey (conflict-free)"),
    }
}

fn show(app: &AppHandle, title: &str, body: &str) {
    if let Err(e) = app.notification().builder().title(title).body(body).show() {
        tracing::warn!(error = %e, title, "failed to show notification");
    }
}

pub fn welcome(app: &AppHandle, chord: &Chord) {
    show(app, "clipstack started", &welcome_text(chord));
}

pub fn status(app: &AppHandle, message: &str) {
    show(app, STATUS_TITLE, message);
}

pub fn history_cleared(app: &AppHandle) {
    show(app, "History Cleared", "All clipboard history has been cleared.");
}
