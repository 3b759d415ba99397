//! Focus handling and synthetic keystrokes
//!
//! Real implementations exist for macOS only. Elsewhere every operation
//! reports `AppError::FeatureMissing` and the picker degrades to
//! copy-only.

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "macos")]
pub use macos::{
    check_accessibility_permissions, ensure_accessibility_permissions, frontmost_app,
    restore_focus, simulate_cmd_v,
};

/// The application that had focus before the picker opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmostApp {
    pub pid: i32,
    pub name: String,
}

#[cfg(not(target_os = "macos"))]
mod fallback {
    use super::FrontmostApp;
    use crate::shared::errors::{AppError, AppResult};

    fn missing(what: &str) -> AppError {
        AppError::FeatureMissing(format!("{} is only supported on macOS", what))
    }

    pub fn check_accessibility_permissions() -> bool {
        false
    }

    pub fn ensure_accessibility_permissions() -> bool {
        false
    }

    pub fn frontmost_app() -> AppResult<FrontmostApp> {
        Err(missing("frontmost application lookup"))
    }

    pub fn restore_focus(_app: &FrontmostApp) -> AppResult<()> {
        Err(missing("focus restore"))
    }

    pub fn simulate_cmd_v() -> AppResult<()> {
        Err(missing("synthetic paste"))
    }
}

#[cfg(not(target_os = "macos"))]
pub use fallback::{
    check_accessibility_permissions, ensure_accessibility_permissions, frontmost_app,
    restore_focus, simulate_cmd_v,
};

#[cfg(all(test, not(target_os = "macos")))]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;

    #[test]
    fn paste_reports_missing_feature_off_macos() {
        assert!(matches!(simulate_cmd_v(), Err(AppError::FeatureMissing(_))));
        assert!(!check_accessibility_permissions());
    }
}
