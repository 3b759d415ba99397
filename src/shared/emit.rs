use tauri::{AppHandle, Emitter};

use super::events::AppEvent;

/// Emit an application event to all windows
pub fn emit_event(app: &AppHandle, event: AppEvent) {
    let name = event.name();
    let result = match &event {
        AppEvent::ClipboardUpdated(entry) => app.emit(name, entry),
        AppEvent::ClipboardCleared => app.emit(name, ()),
        AppEvent::SettingsUpdated(settings) => app.emit(name, settings),
    };

    if let Err(e) = result {
        tracing::warn!(event = name, error = %e, "failed to emit event");
    }
}
