//! Settings commands
//!
//! Settings are never written to disk; they reset on restart.

use std::sync::Arc;

use tauri::{AppHandle, Manager, State};

use crate::shared::emit::emit_event;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::events::AppEvent;
use crate::shared::settings::{AppSettings, SettingsState};
use crate::system::hotkey::{HotkeyRegistry, PickerTrigger};
use crate::system::{dialog, tray};

#[tauri::command]
pub fn get_settings(settings: State<'_, SettingsState>) -> AppResult<AppSettings> {
    Ok(settings.get())
}

#[tauri::command]
pub async fn update_settings(app: AppHandle, settings: AppSettings) -> AppResult<AppSettings> {
    // A failing hotkey switch sleeps between retries
    off_runtime(move || apply_settings(&app, settings)).await
}

/// Run `f` on the blocking pool instead of an async worker
async fn off_runtime<T, F>(f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tauri::async_runtime::spawn_blocking(f)
        .await
        .map_err(|e| AppError::System(format!("settings task failed: {}", e)))?
}

/// Validate and store `next`, re-registering the hotkey when it changed.
///
/// Blocks while a hotkey switch retries. A failed switch leaves every setting
/// untouched and tells the user in a dialog.
pub fn apply_settings(app: &AppHandle, next: AppSettings) -> AppResult<AppSettings> {
    next.validate()?;

    let state = app.state::<SettingsState>();
    let _apply = state.begin_apply();
    let current = state.get();

    if next.hotkey != current.hotkey {
        let handler = Arc::new(PickerTrigger::new(app.clone()));
        if let Err(e) = app.state::<HotkeyRegistry>().switch(app, next.hotkey, handler) {
            dialog::warn_hotkey_unavailable(&next.hotkey.chord());
            return Err(e.into());
        }
    }

    let updated = state.update(|settings| *settings = next);
    tracing::info!(
        hotkey = ?updated.hotkey,
        placement = ?updated.placement,
        "settings updated"
    );

    tray::sync_tray(app, &updated);
    emit_event(app, AppEvent::SettingsUpdated(updated.clone()));
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn off_runtime_passes_result_through() {
        let ok = tauri::async_runtime::block_on(off_runtime(|| Ok(7)));
        assert_eq!(ok.unwrap(), 7);

        let err: AppResult<()> = tauri::async_runtime::block_on(off_runtime(|| {
            Err(AppError::Hotkey("taken".to_string()))
        }));
        assert!(matches!(err, Err(AppError::Hotkey(_))));
    }

    #[test]
    fn off_runtime_runs_on_another_thread() {
        let caller = thread::current().id();
        let worker = tauri::async_runtime::block_on(off_runtime(move || {
            // Stands in for the retry backoff of a failing switch
            thread::sleep(Duration::from_millis(10));
            Ok(thread::current().id())
        }))
        .unwrap();
        assert_ne!(worker, caller);
    }

    #[test]
    fn off_runtime_maps_panics_to_system_error() {
        let result: AppResult<()> =
            tauri::async_runtime::block_on(off_runtime(|| panic!("switch blew up")));
        assert!(matches!(result, Err(AppError::System(_))));
    }
}
