use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::core::hotkey::HotkeyPreset;
use crate::core::placement::PickerPlacement;
use crate::shared::errors::{AppError, AppResult};

pub const HOTKEY_ENV: &str = "CLIPSTACK_HOTKEY";
pub const PLACEMENT_ENV: &str = "CLIPSTACK_PLACEMENT";

const DEFAULT_PASTE_DELAY_MS: u64 = 150;
const MAX_PASTE_DELAY_MS: u64 = 5_000;

/// Runtime settings, kept in memory for the lifetime of the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/bindings/")]
pub struct AppSettings {
    pub hotkey: HotkeyPreset,
    pub placement: PickerPlacement,
    /// Wait between hiding the picker and sending Cmd+V
    #[ts(type = "number")]
    pub paste_delay_ms: u64,
    /// Send Cmd+V after a selection; otherwise only copy
    pub auto_paste: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hotkey: HotkeyPreset::default(),
            placement: PickerPlacement::default(),
            paste_delay_ms: DEFAULT_PASTE_DELAY_MS,
            auto_paste: true,
        }
    }
}

impl AppSettings {
    /// Defaults with `CLIPSTACK_HOTKEY` / `CLIPSTACK_PLACEMENT` applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup(HOTKEY_ENV) {
            match HotkeyPreset::from_key(&raw) {
                Some(preset) => settings.hotkey = preset,
                None => tracing::warn!(value = %raw, "ignoring unknown {}", HOTKEY_ENV),
            }
        }

        if let Some(raw) = lookup(PLACEMENT_ENV) {
            match PickerPlacement::from_key(&raw) {
                Some(placement) => settings.placement = placement,
                None => tracing::warn!(value = %raw, "ignoring unknown {}", PLACEMENT_ENV),
            }
        }

        settings
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.paste_delay_ms)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.paste_delay_ms > MAX_PASTE_DELAY_MS {
            return Err(AppError::InvalidInput(format!(
                "paste delay must be at most {} ms",
                MAX_PASTE_DELAY_MS
            )));
        }
        Ok(())
    }
}

/// Managed-state holder shared by commands and the tray
#[derive(Debug, Default)]
pub struct SettingsState {
    settings: Mutex<AppSettings>,
    /// Held for a whole apply so the registered hotkey and the stored one agree
    apply: Mutex<()>,
}

impl SettingsState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
            apply: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppSettings> {
        match self.settings.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("settings mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Serializes read-switch-store sequences. `get` and `update` stay usable
    /// while it is held.
    pub fn begin_apply(&self) -> MutexGuard<'_, ()> {
        match self.apply.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn get(&self) -> AppSettings {
        self.lock().clone()
    }

    /// Apply `f` and return the updated settings
    pub fn update(&self, f: impl FnOnce(&mut AppSettings)) -> AppSettings {
        let mut settings = self.lock();
        f(&mut settings);
        settings.clone()
    }
}
