//! Clipboard history commands

use std::sync::Arc;

use tauri::{AppHandle, Manager, State};
use uuid::Uuid;

use crate::core::clipboard::{filter_entries, ClipboardStore};
use crate::shared::emit::emit_event;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::events::AppEvent;
use crate::shared::settings::SettingsState;
use crate::shared::types::EntryView;
use crate::system::{automation, window};
use crate::system::window::FocusMemory;

/// History rows, most recent first, optionally filtered by `query`
#[tauri::command]
pub fn get_clipboard_history(
    store: State<'_, Arc<ClipboardStore>>,
    query: Option<String>,
) -> AppResult<Vec<EntryView>> {
    let snapshot = store.snapshot();
    let query = query.unwrap_or_default();
    Ok(filter_entries(&snapshot, &query)
        .into_iter()
        .map(EntryView::from)
        .collect())
}

/// Put the entry back on the clipboard and paste it into the app that was
/// focused before the picker opened.
///
/// The synthetic paste runs after this returns; its failures are only logged
/// since the text is already on the clipboard.
#[tauri::command]
pub async fn paste_clipboard_entry(app: AppHandle, id: String) -> AppResult<()> {
    let id = Uuid::parse_str(&id).map_err(|e| AppError::InvalidInput(format!("bad entry id: {}", e)))?;

    let store = app.state::<Arc<ClipboardStore>>();
    let entry = store
        .find(id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    store.clipboard().write_text(entry.content())?;
    tracing::debug!(%id, "entry written to clipboard");

    window::hide_picker(&app)?;

    let settings = app.state::<SettingsState>().get();
    let target = app.state::<FocusMemory>().take();
    if !settings.auto_paste {
        return Ok(());
    }

    let delay = settings.paste_delay();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(delay).await;

        if let Some(target) = target {
            if let Err(e) = automation::restore_focus(&target) {
                tracing::warn!(error = %e, "could not restore focus before paste");
            }
        }

        if let Err(e) = automation::simulate_cmd_v() {
            tracing::warn!(error = %e, "synthetic paste failed, text left on clipboard");
        }
    });

    Ok(())
}

/// Empty the history and tell the webview
pub fn clear_history(app: &AppHandle) {
    app.state::<Arc<ClipboardStore>>().clear();
    tracing::info!("clipboard history cleared");
    emit_event(app, AppEvent::ClipboardCleared);
}

#[tauri::command]
pub fn clear_clipboard_history(app: AppHandle) -> AppResult<()> {
    clear_history(&app);
    Ok(())
}
