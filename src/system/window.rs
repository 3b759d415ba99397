//! Picker window lifecycle
//!
//! The window is built lazily on first use and then only shown and hidden.
//! It hides itself when it loses focus.

use std::sync::{Mutex, MutexGuard};

use mouse_position::mouse_position::Mouse;
use tauri::{AppHandle, LogicalPosition, Manager, Monitor, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::core::placement::{PickerPlacement, PICKER_HEIGHT, PICKER_WIDTH};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::settings::SettingsState;
use crate::shared::types::{CursorPosition, ScreenBounds};
use crate::system::automation::{self, FrontmostApp};

pub const PICKER_LABEL: &str = "picker-window";

/// Application that was frontmost when the picker opened
#[derive(Debug, Default)]
pub struct FocusMemory(Mutex<Option<FrontmostApp>>);

impl FocusMemory {
    fn lock(&self) -> MutexGuard<'_, Option<FrontmostApp>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn remember(&self, app: FrontmostApp) {
        *self.lock() = Some(app);
    }

    pub fn take(&self) -> Option<FrontmostApp> {
        self.lock().take()
    }
}

fn cursor_position() -> Option<CursorPosition> {
    match Mouse::get_mouse_position() {
        Mouse::Position { x, y } => Some(CursorPosition {
            x: x as f64,
            y: y as f64,
        }),
        Mouse::Error => None,
    }
}

fn logical_bounds(monitor: &Monitor) -> ScreenBounds {
    let scale = monitor.scale_factor();
    let position = monitor.position().to_logical::<f64>(scale);
    let size = monitor.size().to_logical::<f64>(scale);
    ScreenBounds {
        x: position.x,
        y: position.y,
        width: size.width,
        height: size.height,
    }
}

/// Screen holding the cursor, else the first one
fn screen_for_cursor(screens: &[ScreenBounds], cursor: CursorPosition) -> Option<ScreenBounds> {
    screens
        .iter()
        .find(|screen| screen.contains(cursor))
        .or_else(|| screens.first())
        .copied()
}

fn picker_position(app: &AppHandle, placement: PickerPlacement) -> AppResult<LogicalPosition<f64>> {
    let mut screens: Vec<ScreenBounds> = app.available_monitors()?.iter().map(logical_bounds).collect();
    if let Some(primary) = app.primary_monitor()? {
        // Primary first so it wins the fallback
        screens.insert(0, logical_bounds(&primary));
    }

    let (placement, cursor) = match cursor_position() {
        Some(cursor) => (placement, cursor),
        None => {
            tracing::debug!("cursor position unavailable, centring picker");
            (PickerPlacement::Center, CursorPosition { x: 0.0, y: 0.0 })
        }
    };

    let screen = screen_for_cursor(&screens, cursor)
        .ok_or_else(|| AppError::Window("no monitor found".to_string()))?;
    let position = placement.position(cursor, screen, (PICKER_WIDTH, PICKER_HEIGHT));
    Ok(LogicalPosition::new(position.x, position.y))
}

fn build_picker(app: &AppHandle) -> AppResult<WebviewWindow> {
    let window = WebviewWindowBuilder::new(app, PICKER_LABEL, WebviewUrl::App("index.html".into()))
        .title("Clipboard History")
        .inner_size(PICKER_WIDTH, PICKER_HEIGHT)
        .resizable(false)
        .decorations(false)
        .always_on_top(true)
        .skip_taskbar(true)
        .visible(false)
        .build()?;

    let window_clone = window.clone();
    window.on_window_event(move |event| {
        if let tauri::WindowEvent::Focused(false) = event {
            if let Err(e) = window_clone.hide() {
                tracing::warn!(error = %e, "failed to hide picker on blur");
            }
        }
    });

    tracing::debug!("picker window created");
    Ok(window)
}

fn picker_window(app: &AppHandle) -> AppResult<WebviewWindow> {
    match app.get_webview_window(PICKER_LABEL) {
        Some(window) => Ok(window),
        None => build_picker(app),
    }
}

/// Remember the focused app, position the picker and bring it up
pub fn show_picker(app: &AppHandle) -> AppResult<()> {
    match automation::frontmost_app() {
        Ok(front) if front.pid != std::process::id() as i32 => {
            tracing::debug!(app = %front.name, "remembering frontmost app");
            app.state::<FocusMemory>().remember(front);
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "frontmost app unavailable"),
    }

    let placement = app.state::<SettingsState>().get().placement;
    let window = picker_window(app)?;

    match picker_position(app, placement) {
        Ok(position) => window.set_position(position)?,
        Err(e) => {
            tracing::warn!(error = %e, "could not compute picker position, centring");
            window.center()?;
        }
    }

    window.show()?;
    window.set_focus()?;
    Ok(())
}

pub fn hide_picker(app: &AppHandle) -> AppResult<()> {
    if let Some(window) = app.get_webview_window(PICKER_LABEL) {
        window.hide()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(x: f64, width: f64) -> ScreenBounds {
        ScreenBounds {
            x,
            y: 0.0,
            width,
            height: 900.0,
        }
    }

    #[test]
    fn picks_screen_under_cursor() {
        let screens = [screen(0.0, 1440.0), screen(1440.0, 1920.0)];
        let found = screen_for_cursor(&screens, CursorPosition { x: 2000.0, y: 10.0 });
        assert_eq!(found, Some(screens[1]));
    }

    #[test]
    fn falls_back_to_first_screen() {
        let screens = [screen(0.0, 1440.0)];
        let found = screen_for_cursor(&screens, CursorPosition { x: -50.0, y: 10.0 });
        assert_eq!(found, Some(screens[0]));
        assert_eq!(screen_for_cursor(&[], CursorPosition { x: 0.0, y: 0.0 }), None);
    }

    #[test]
    fn focus_memory_is_taken_once() {
        let memory = FocusMemory::default();
        memory.remember(FrontmostApp {
            pid: 42,
            name: "Editor".to_string(),
        });
        assert_eq!(memory.take().map(|app| app.pid), Some(42));
        assert!(memory.take().is_none());
    }
}
