//! Tray icon and menu

use tauri::image::Image;
use tauri::menu::{CheckMenuItem, IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::{App, AppHandle, Manager, Wry};

use crate::api::commands::{history, settings as settings_cmd};
use crate::core::clipboard::ClipboardMonitor;
use crate::core::hotkey::HotkeyPreset;
use crate::core::placement::PickerPlacement;
use crate::shared::settings::{AppSettings, SettingsState};
use crate::system::{dialog, notify, window};

const SHOW_ID: &str = "show_history";
const TOGGLE_MONITOR_ID: &str = "toggle_monitor";
const CLEAR_ID: &str = "clear_history";
const ABOUT_ID: &str = "about";
const QUIT_ID: &str = "quit";
const PLACEMENT_PREFIX: &str = "placement:";
const HOTKEY_PREFIX: &str = "hotkey:";

const PAUSE_LABEL: &str = "Pause Monitoring";
const RESUME_LABEL: &str = "Resume Monitoring";

/// Menu items whose state changes at runtime
pub struct TrayHandles {
    toggle_monitor: MenuItem<Wry>,
    placements: Vec<(PickerPlacement, CheckMenuItem<Wry>)>,
    hotkeys: Vec<(HotkeyPreset, CheckMenuItem<Wry>)>,
}

impl TrayHandles {
    /// Reflect `settings` in the check marks
    pub fn sync(&self, settings: &AppSettings) {
        for (placement, item) in &self.placements {
            if let Err(e) = item.set_checked(*placement == settings.placement) {
                tracing::warn!(error = %e, "failed to update placement check");
            }
        }
        for (preset, item) in &self.hotkeys {
            if let Err(e) = item.set_checked(*preset == settings.hotkey) {
                tracing::warn!(error = %e, "failed to update hotkey check");
            }
        }
    }

    fn set_monitoring(&self, running: bool) {
        let label = if running { PAUSE_LABEL } else { RESUME_LABEL };
        if let Err(e) = self.toggle_monitor.set_text(label) {
            tracing::warn!(error = %e, "failed to update monitor menu item");
        }
    }
}

/// Refresh tray check marks, if the tray exists
pub fn sync_tray(app: &AppHandle, settings: &AppSettings) {
    if let Some(handles) = app.try_state::<TrayHandles>() {
        handles.sync(settings);
    }
}

/// Show "Pause" or "Resume" on the monitor item
pub fn set_monitoring_label(app: &AppHandle, running: bool) {
    if let Some(handles) = app.try_state::<TrayHandles>() {
        handles.set_monitoring(running);
    }
}

/// Build the tray icon and register [`TrayHandles`] as managed state
pub fn create_tray(app: &App) -> tauri::Result<()> {
    let settings = app.state::<SettingsState>().get();

    let show_item = MenuItem::with_id(app, SHOW_ID, "Show Clipboard History", true, None::<&str>)?;
    let toggle_monitor = MenuItem::with_id(app, TOGGLE_MONITOR_ID, PAUSE_LABEL, true, None::<&str>)?;
    let clear_item = MenuItem::with_id(app, CLEAR_ID, "Clear History", true, None::<&str>)?;
    let about_item = MenuItem::with_id(app, ABOUT_ID, "About", true, None::<&str>)?;
    let quit_item = MenuItem::with_id(app, QUIT_ID, "Quit", true, None::<&str>)?;

    let placements = PickerPlacement::ALL
        .into_iter()
        .map(|placement| {
            CheckMenuItem::with_id(
                app,
                format!("{}{}", PLACEMENT_PREFIX, placement.key()),
                placement.label(),
                true,
                placement == settings.placement,
                None::<&str>,
            )
            .map(|item| (placement, item))
        })
        .collect::<tauri::Result<Vec<_>>>()?;

    let hotkeys = HotkeyPreset::ALL
        .into_iter()
        .map(|preset| {
            CheckMenuItem::with_id(
                app,
                format!("{}{}", HOTKEY_PREFIX, preset.key()),
                preset.label(),
                true,
                preset == settings.hotkey,
                None::<&str>,
            )
            .map(|item| (preset, item))
        })
        .collect::<tauri::Result<Vec<_>>>()?;

    let placement_refs: Vec<&dyn IsMenuItem<Wry>> =
        placements.iter().map(|(_, item)| item as &dyn IsMenuItem<Wry>).collect();
    let hotkey_refs: Vec<&dyn IsMenuItem<Wry>> =
        hotkeys.iter().map(|(_, item)| item as &dyn IsMenuItem<Wry>).collect();
    let placement_menu = Submenu::with_items(app, "Window Position", true, &placement_refs)?;
    let hotkey_menu = Submenu::with_items(app, "Hotkey Options", true, &hotkey_refs)?;

    let menu = Menu::with_items(
        app,
        &[
            &show_item,
            &PredefinedMenuItem::separator(app)?,
            &placement_menu,
            &hotkey_menu,
            &PredefinedMenuItem::separator(app)?,
            &toggle_monitor,
            &clear_item,
            &PredefinedMenuItem::separator(app)?,
            &about_item,
            &quit_item,
        ],
    )?;

    let icon = match app.default_window_icon() {
        Some(icon) => icon.clone(),
        None => Image::from_bytes(include_bytes!("../../icons/32x32.png"))?,
    };

    TrayIconBuilder::with_id("clipstack-tray")
        .icon(icon)
        .tooltip("clipstack")
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| handle_menu_event(app, event.id().as_ref()))
        .on_tray_icon_event(|tray, event| {
            if opens_picker(&event) {
                show_picker_from_tray(tray.app_handle());
            }
        })
        .build(app)?;

    app.manage(TrayHandles {
        toggle_monitor,
        placements,
        hotkeys,
    });
    Ok(())
}

/// Left click on the icon opens the picker; the menu stays on right click
fn opens_picker(event: &TrayIconEvent) -> bool {
    matches!(
        event,
        TrayIconEvent::Click {
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
            ..
        }
    )
}

fn show_picker_from_tray(app: &AppHandle) {
    if let Err(e) = window::show_picker(app) {
        tracing::error!(error = %e, "failed to show picker from tray");
    }
}

fn handle_menu_event(app: &AppHandle, id: &str) {
    match id {
        SHOW_ID => show_picker_from_tray(app),
        TOGGLE_MONITOR_ID => {
            let running = app.state::<ClipboardMonitor>().toggle();
            tracing::info!(running, "clipboard monitoring toggled");
            set_monitoring_label(app, running);
        }
        CLEAR_ID => {
            let app = app.clone();
            tauri::async_runtime::spawn(async move {
                if dialog::confirm_clear_history().await {
                    history::clear_history(&app);
                    notify::history_cleared(&app);
                }
            });
        }
        ABOUT_ID => {
            let chord = app.state::<SettingsState>().get().hotkey.chord();
            dialog::show_about(&chord);
        }
        QUIT_ID => app.exit(0),
        other => {
            if let Some(key) = other.strip_prefix(PLACEMENT_PREFIX) {
                if let Some(placement) = PickerPlacement::from_key(key) {
                    let mut next = app.state::<SettingsState>().get();
                    next.placement = placement;
                    apply_from_tray(app, next, notify::placement_text(placement).to_string());
                }
            } else if let Some(key) = other.strip_prefix(HOTKEY_PREFIX) {
                if let Some(preset) = HotkeyPreset::from_key(key) {
                    let mut next = app.state::<SettingsState>().get();
                    let changed = next.hotkey != preset;
                    next.hotkey = preset;
                    apply_from_tray(app, next, notify::hotkey_text(preset, changed));
                }
            } else {
                tracing::debug!(id = other, "unhandled tray menu event");
            }
        }
    }
}

/// Apply `next` and confirm with `message` once it took effect
fn apply_from_tray(app: &AppHandle, next: AppSettings, message: String) {
    // Hotkey registration may back off for a while; keep the event loop free
    let app = app.clone();
    tauri::async_runtime::spawn_blocking(move || match settings_cmd::apply_settings(&app, next) {
        Ok(_) => notify::status(&app, &message),
        Err(e) => {
            tracing::error!(error = %e, "failed to apply settings from tray");
            // Undo the check mark the click toggled
            sync_tray(&app, &app.state::<SettingsState>().get());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tauri::tray::TrayIconId;
    use tauri::{PhysicalPosition, PhysicalSize, Rect};

    fn click(button: MouseButton, button_state: MouseButtonState) -> TrayIconEvent {
        TrayIconEvent::Click {
            id: TrayIconId::new("clipstack-tray"),
            position: PhysicalPosition::new(0.0, 0.0),
            rect: Rect {
                position: PhysicalPosition::new(0, 0).into(),
                size: PhysicalSize::new(16, 16).into(),
            },
            button,
            button_state,
        }
    }

    #[test]
    fn left_click_release_opens_picker() {
        assert!(opens_picker(&click(MouseButton::Left, MouseButtonState::Up)));
    }

    #[test]
    fn other_clicks_leave_picker_closed() {
        assert!(!opens_picker(&click(MouseButton::Left, MouseButtonState::Down)));
        assert!(!opens_picker(&click(MouseButton::Right, MouseButtonState::Up)));
    }
}
