//! Error types with thiserror
//!
//! `ClipboardError` and `HotkeyError` stay inside the backend. `AppError` is
//! the only type that crosses IPC, so it is serializable and every command
//! returns `AppResult<T>`.

use serde::Serialize;
use thiserror::Error;

/// Failures of the OS clipboard port
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// Clipboard could not be opened or read (locked by another process, no pasteboard, ...)
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// Writing a text representation failed
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Failures while parsing or registering a global chord
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("invalid chord '{0}'")]
    InvalidChord(String),

    #[error("failed to register {chord}: {reason}")]
    Register { chord: String, reason: String },
}

/// Command execution errors
///
/// All variants are serializable for IPC communication with the picker window.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Clipboard operation error
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Hotkey parsing or registration error
    #[error("Hotkey error: {0}")]
    Hotkey(String),

    /// Requested history entry no longer exists (evicted or cleared)
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Invalid input or parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Window operation error
    #[error("Window error: {0}")]
    Window(String),

    /// Accessibility permissions denied
    #[error("Accessibility permissions denied. Please enable in System Settings > Privacy & Security > Accessibility.")]
    AccessibilityDenied,

    /// Required platform feature is missing or unavailable
    #[error("Feature missing: {0}")]
    FeatureMissing(String),

    /// System-level failure (event sources, workspace lookups, ...)
    #[error("System error: {0}")]
    System(String),
}

impl From<ClipboardError> for AppError {
    fn from(err: ClipboardError) -> Self {
        AppError::Clipboard(err.to_string())
    }
}

impl From<HotkeyError> for AppError {
    fn from(err: HotkeyError) -> Self {
        AppError::Hotkey(err.to_string())
    }
}

impl From<tauri::Error> for AppError {
    fn from(err: tauri::Error) -> Self {
        AppError::Window(err.to_string())
    }
}

// Helper type alias for command results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_serializes_as_tagged_message() {
        let err = AppError::NotFound("1234".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "1234");
    }

    #[test]
    fn unit_variant_serializes_without_message() {
        let json = serde_json::to_value(AppError::AccessibilityDenied).unwrap();
        assert_eq!(json["type"], "AccessibilityDenied");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn clipboard_error_converts_with_context() {
        let err: AppError = ClipboardError::Write("pasteboard busy".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Clipboard error: clipboard write failed: pasteboard busy"
        );
    }
}
