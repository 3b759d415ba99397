//! Global shortcut adapter on top of `tauri-plugin-global-shortcut`

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::core::hotkey::{Chord, ChordHandler, DebouncedHandler, HotkeyPreset};
use crate::shared::errors::HotkeyError;
use crate::system::{dialog, window};

const MAX_ATTEMPTS: u32 = 5;

/// Opens the picker when the chord fires
pub struct PickerTrigger {
    app: AppHandle,
}

impl PickerTrigger {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ChordHandler for PickerTrigger {
    fn on_chord_detected(&self, chord: &Chord) {
        tracing::debug!(%chord, "hotkey pressed");
        if let Err(e) = window::show_picker(&self.app) {
            tracing::error!(error = %e, "failed to show picker from hotkey");
        }
    }
}

/// Currently registered shortcut, kept in managed state
#[derive(Default)]
pub struct HotkeyRegistry {
    active: Mutex<Option<(HotkeyPreset, Shortcut)>>,
}

impl HotkeyRegistry {
    fn active(&self) -> MutexGuard<'_, Option<(HotkeyPreset, Shortcut)>> {
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn current(&self) -> Option<HotkeyPreset> {
        self.active().as_ref().map(|(preset, _)| *preset)
    }

    /// Register `preset`, retrying with exponential backoff (100 ms doubling).
    pub fn register(
        &self,
        app: &AppHandle,
        preset: HotkeyPreset,
        handler: Arc<dyn ChordHandler>,
    ) -> Result<(), HotkeyError> {
        let chord = preset.chord();
        let shortcut: Shortcut = chord
            .accelerator()
            .parse()
            .map_err(|_| HotkeyError::InvalidChord(chord.to_string()))?;

        // Clear a stale registration from a previous run of the handler
        if app.global_shortcut().is_registered(shortcut) {
            let _ = app.global_shortcut().unregister(shortcut);
        }

        let debounced = Arc::new(DebouncedHandler::new(handler, preset.debounce()));
        let mut last_error = String::new();

        for attempt in 0..MAX_ATTEMPTS {
            let debounced = Arc::clone(&debounced);
            let chord_for_handler = chord.clone();
            let result = app.global_shortcut().on_shortcut(shortcut, move |_app, _shortcut, event| {
                if event.state == ShortcutState::Pressed {
                    debounced.on_chord_detected(&chord_for_handler);
                }
            });

            match result {
                Ok(()) => {
                    tracing::info!(%chord, attempt = attempt + 1, "registered global shortcut");
                    *self.active() = Some((preset, shortcut));
                    dialog::hotkey_registered(&chord);
                    return Ok(());
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt + 1 < MAX_ATTEMPTS {
                        let delay_ms = 100 * 2_u64.pow(attempt);
                        tracing::warn!(
                            %chord,
                            attempt = attempt + 1,
                            error = %e,
                            "shortcut registration failed, retrying in {}ms",
                            delay_ms
                        );
                        thread::sleep(Duration::from_millis(delay_ms));
                    }
                }
            }
        }

        tracing::error!(%chord, error = %last_error, "giving up on global shortcut");
        Err(HotkeyError::Register {
            chord: chord.to_string(),
            reason: last_error,
        })
    }

    /// Swap the active shortcut for `preset`. On failure the previous one
    /// is put back.
    pub fn switch(
        &self,
        app: &AppHandle,
        preset: HotkeyPreset,
        handler: Arc<dyn ChordHandler>,
    ) -> Result<(), HotkeyError> {
        let previous = self.active().take();
        if let Some((old_preset, old_shortcut)) = &previous {
            if *old_preset == preset {
                *self.active() = previous;
                return Ok(());
            }
            if let Err(e) = app.global_shortcut().unregister(*old_shortcut) {
                tracing::warn!(error = %e, "failed to unregister previous shortcut");
            }
        }

        match self.register(app, preset, Arc::clone(&handler)) {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Some((old_preset, _)) = previous {
                    if let Err(restore) = self.register(app, old_preset, handler) {
                        tracing::error!(error = %restore, "could not restore previous shortcut");
                    }
                }
                Err(e)
            }
        }
    }
}
