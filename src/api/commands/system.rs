//! Monitor control and accessibility checks

use tauri::{AppHandle, Manager, State};

use crate::core::clipboard::ClipboardMonitor;
use crate::shared::errors::AppResult;
use crate::system::{automation, tray};

/// Whether synthetic paste is permitted
#[tauri::command]
pub fn check_accessibility_permissions() -> AppResult<bool> {
    Ok(automation::check_accessibility_permissions())
}

/// Same as above, but shows the macOS prompt if not yet trusted
#[tauri::command]
pub fn request_accessibility_permissions() -> AppResult<bool> {
    Ok(automation::ensure_accessibility_permissions())
}

#[tauri::command]
pub fn get_clipboard_monitor_status(monitor: State<'_, ClipboardMonitor>) -> AppResult<bool> {
    Ok(monitor.is_running())
}

/// Pause or resume polling; returns the new running state
#[tauri::command]
pub fn toggle_clipboard_monitor(app: AppHandle) -> AppResult<bool> {
    let running = app.state::<ClipboardMonitor>().toggle();
    tray::set_monitoring_label(&app, running);
    Ok(running)
}
