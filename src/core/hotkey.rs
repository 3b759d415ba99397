//! Global hotkey model
//!
//! `Chord` is the platform-neutral description of a key combination. The OS
//! hook (see `system::hotkey`) turns presses into `ChordHandler` calls; the
//! debounce lives here so it can be tested without a keyboard.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::shared::errors::HotkeyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Cmd,
    Shift,
    Ctrl,
    Alt,
}

impl Modifier {
    fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "cmd" | "command" | "super" | "meta" => Some(Self::Cmd),
            "shift" => Some(Self::Shift),
            "ctrl" | "control" => Some(Self::Ctrl),
            "alt" | "option" | "opt" => Some(Self::Alt),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Cmd => "Cmd",
            Self::Shift => "Shift",
            Self::Ctrl => "Ctrl",
            Self::Alt => "Alt",
        }
    }

    /// Token understood by the global-shortcut accelerator parser
    fn accelerator(self) -> &'static str {
        match self {
            Self::Cmd => "Super",
            Self::Shift => "Shift",
            Self::Ctrl => "Control",
            Self::Alt => "Alt",
        }
    }
}

/// A set of modifiers plus exactly one key, e.g. `Cmd+Shift+V`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    modifiers: BTreeSet<Modifier>,
    key: String,
}

impl Chord {
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: &str) -> Result<Self, HotkeyError> {
        let key = normalize_key(key).ok_or_else(|| HotkeyError::InvalidChord(key.to_string()))?;
        Ok(Self {
            modifiers: modifiers.into_iter().collect(),
            key,
        })
    }

    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.modifiers.iter().copied()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Accelerator string for `tauri-plugin-global-shortcut` (Cmd maps to Super)
    pub fn accelerator(&self) -> String {
        self.modifiers
            .iter()
            .map(|m| m.accelerator())
            .chain(std::iter::once(self.key.as_str()))
            .collect::<Vec<_>>()
            .join("+")
    }
}

fn normalize_key(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let mut chars = key.chars();
    let first = chars.next()?.to_ascii_uppercase();
    Some(std::iter::once(first).chain(chars.map(|c| c.to_ascii_lowercase())).collect())
}

impl FromStr for Chord {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HotkeyError::InvalidChord(s.to_string());

        let mut modifiers = BTreeSet::new();
        let mut key = None;

        for token in s.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(invalid());
            }
            match Modifier::parse(token) {
                Some(modifier) => {
                    modifiers.insert(modifier);
                }
                None if key.is_none() => key = Some(token),
                // A second non-modifier token
                None => return Err(invalid()),
            }
        }

        let key = key.ok_or_else(invalid)?;
        Chord::new(modifiers, key).map_err(|_| invalid())
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.label())?;
        }
        f.write_str(&self.key)
    }
}

/// Receives chords accepted by the OS hook
pub trait ChordHandler: Send + Sync {
    fn on_chord_detected(&self, chord: &Chord);
}

/// Drops triggers that arrive within `min_interval` of the last accepted one
#[derive(Debug)]
pub struct TriggerGate {
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

impl TriggerGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Whether a trigger at `now` should fire
    pub fn try_trigger_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.min_interval {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }

    pub fn try_trigger(&mut self) -> bool {
        self.try_trigger_at(Instant::now())
    }
}

/// Wraps a handler with a [`TriggerGate`]
pub struct DebouncedHandler {
    inner: Arc<dyn ChordHandler>,
    gate: Mutex<TriggerGate>,
}

impl DebouncedHandler {
    pub fn new(inner: Arc<dyn ChordHandler>, min_interval: Duration) -> Self {
        Self {
            inner,
            gate: Mutex::new(TriggerGate::new(min_interval)),
        }
    }
}

impl ChordHandler for DebouncedHandler {
    fn on_chord_detected(&self, chord: &Chord) {
        let accepted = match self.gate.lock() {
            Ok(mut gate) => gate.try_trigger(),
            Err(poisoned) => poisoned.into_inner().try_trigger(),
        };

        if accepted {
            self.inner.on_chord_detected(chord);
        } else {
            tracing::trace!(%chord, "hotkey debounced");
        }
    }
}

/// Built-in hotkey choices offered in the tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../ui/bindings/")]
pub enum HotkeyPreset {
    /// Cmd+Shift+V
    #[default]
    Standard,
    /// Cmd+Shift+C, for setups where Cmd+Shift+V is taken
    Alternative,
}

impl HotkeyPreset {
    pub const ALL: [HotkeyPreset; 2] = [Self::Standard, Self::Alternative];

    pub fn chord(self) -> Chord {
        let key = match self {
            Self::Standard => "V",
            Self::Alternative => "C",
        };
        Chord {
            modifiers: [Modifier::Cmd, Modifier::Shift].into_iter().collect(),
            key: key.to_string(),
        }
    }

    pub fn debounce(self) -> Duration {
        match self {
            Self::Standard => Duration::from_millis(500),
            Self::Alternative => Duration::from_millis(300),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Alternative => "alternative",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn label(self) -> String {
        match self {
            Self::Standard => format!("Standard ({})", self.chord()),
            Self::Alternative => format!("Alternative ({})", self.chord()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_parse_and_display() {
        let chord: Chord = "Cmd+Shift+V".parse().unwrap();
        assert_eq!(chord.key(), "V");
        assert_eq!(chord.modifiers().collect::<Vec<_>>(), vec![Modifier::Cmd, Modifier::Shift]);
        assert_eq!(chord.to_string(), "Cmd+Shift+V");
    }

    #[test]
    fn test_parse_normalizes_aliases_and_order() {
        let chord: Chord = " shift + command + v ".parse().unwrap();
        assert_eq!(chord.to_string(), "Cmd+Shift+V");

        let chord: Chord = "option+control+f5".parse().unwrap();
        assert_eq!(chord.to_string(), "Ctrl+Alt+F5");
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["Cmd+Shift+V", "Ctrl+Alt+Space", "Cmd+K", "F12"] {
            let chord: Chord = text.parse().unwrap();
            assert_eq!(chord.to_string().parse::<Chord>().unwrap(), chord);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "Cmd+Shift", "Cmd++V", "Cmd+V+C", "Cmd+!", "+V"] {
            assert!(
                matches!(bad.parse::<Chord>(), Err(HotkeyError::InvalidChord(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_accelerator_maps_cmd_to_super() {
        assert_eq!(HotkeyPreset::Standard.chord().accelerator(), "Super+Shift+V");
        let chord: Chord = "Ctrl+Alt+K".parse().unwrap();
        assert_eq!(chord.accelerator(), "Control+Alt+K");
    }

    #[test]
    fn test_presets() {
        assert_eq!(HotkeyPreset::Standard.chord().to_string(), "Cmd+Shift+V");
        assert_eq!(HotkeyPreset::Standard.debounce(), Duration::from_millis(500));
        assert_eq!(HotkeyPreset::Alternative.chord().to_string(), "Cmd+Shift+C");
        assert_eq!(HotkeyPreset::Alternative.debounce(), Duration::from_millis(300));
        assert_eq!(HotkeyPreset::from_key("ALTERNATIVE"), Some(HotkeyPreset::Alternative));
        assert_eq!(HotkeyPreset::from_key("other"), None);
    }

    #[test]
    fn test_trigger_gate_debounces() {
        let mut gate = TriggerGate::new(Duration::from_millis(500));
        let t0 = Instant::now();

        assert!(gate.try_trigger_at(t0));
        assert!(!gate.try_trigger_at(t0 + Duration::from_millis(100)));
        assert!(!gate.try_trigger_at(t0 + Duration::from_millis(499)));
        assert!(gate.try_trigger_at(t0 + Duration::from_millis(500)));
        // Window restarts from the last accepted trigger
        assert!(!gate.try_trigger_at(t0 + Duration::from_millis(900)));
        assert!(gate.try_trigger_at(t0 + Duration::from_millis(1000)));
    }

    struct Counter(AtomicUsize);

    impl ChordHandler for Counter {
        fn on_chord_detected(&self, _chord: &Chord) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_debounced_handler_drops_rapid_repeats() {
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let handler = DebouncedHandler::new(counter.clone(), Duration::from_secs(60));
        let chord = HotkeyPreset::Standard.chord();

        for _ in 0..5 {
            handler.on_chord_detected(&chord);
        }
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}
