//! Picker window commands

use tauri::AppHandle;

use crate::shared::errors::AppResult;
use crate::system::window;

#[tauri::command]
pub fn show_picker(app: AppHandle) -> AppResult<()> {
    window::show_picker(&app)
}

#[tauri::command]
pub fn hide_picker(app: AppHandle) -> AppResult<()> {
    window::hide_picker(&app)
}
