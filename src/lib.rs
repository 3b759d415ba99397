pub mod api;
pub mod core;
pub mod logging;
pub mod shared;
pub mod system;

use std::sync::Arc;

use tauri::{Manager, RunEvent};

use crate::api::commands;
use crate::core::clipboard::{ClipboardMonitor, ClipboardStore};
use crate::shared::emit::emit_event;
use crate::shared::events::AppEvent;
use crate::shared::settings::{AppSettings, SettingsState};
use crate::shared::types::EntryView;
use crate::system::clipboard::NativeClipboard;
use crate::system::hotkey::{HotkeyRegistry, PickerTrigger};
use crate::system::window::FocusMemory;
use crate::system::{dialog, notify, tray};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(e) = logging::init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {}", e);
    }

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .plugin(tauri_plugin_notification::init())
        .setup(|app| {
            // Tray-only: no Dock icon, no app menu
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            let settings = AppSettings::from_env();
            tracing::info!(
                hotkey = %settings.hotkey.chord(),
                placement = ?settings.placement,
                "starting clipstack"
            );
            let preset = settings.hotkey;
            app.manage(SettingsState::new(settings));
            app.manage(FocusMemory::default());
            app.manage(HotkeyRegistry::default());

            let store = Arc::new(ClipboardStore::new(Arc::new(NativeClipboard::new())));
            app.manage(Arc::clone(&store));

            let handle = app.handle().clone();
            let monitor = ClipboardMonitor::new(store).on_insert(move |entry| {
                emit_event(&handle, AppEvent::ClipboardUpdated(EntryView::from(entry)));
            });
            if !monitor.start() {
                tracing::error!("clipboard monitor did not start");
            }
            app.manage(monitor);

            tray::create_tray(app)?;

            let trigger = Arc::new(PickerTrigger::new(app.handle().clone()));
            if let Err(e) = app.state::<HotkeyRegistry>().register(app.handle(), preset, trigger) {
                tracing::warn!(error = %e, "continuing without global shortcut, use the tray menu");
                dialog::warn_hotkey_unavailable(&preset.chord());
            }
            notify::welcome(app.handle(), &preset.chord());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::history::get_clipboard_history,
            commands::history::paste_clipboard_entry,
            commands::history::clear_clipboard_history,
            commands::window::show_picker,
            commands::window::hide_picker,
            commands::settings::get_settings,
            commands::settings::update_settings,
            commands::system::check_accessibility_permissions,
            commands::system::request_accessibility_permissions,
            commands::system::get_clipboard_monitor_status,
            commands::system::toggle_clipboard_monitor,
        ])
        .build(tauri::generate_context!());

    let app = match app {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to start application");
            std::process::exit(1);
        }
    };

    app.run(|app, event| match event {
        // Hiding the last window must not quit a tray app; only Quit does
        RunEvent::ExitRequested { code: None, api, .. } => api.prevent_exit(),
        RunEvent::Exit => {
            app.state::<ClipboardMonitor>().stop();
            tracing::info!("clipstack exiting");
        }
        _ => {}
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn picker_capability_grants_only_used_permissions() {
        let capability: serde_json::Value =
            serde_json::from_str(include_str!("../capabilities/default.json")).unwrap();
        let permissions: Vec<&str> = capability["permissions"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p.as_str())
            .collect();

        // The picker hides through the `hide_picker` command
        assert!(!permissions.iter().any(|p| p.starts_with("core:window:")));
        assert_eq!(permissions, ["core:default", "global-shortcut:default"]);
    }
}
