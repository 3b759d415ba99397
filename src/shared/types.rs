use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::core::clipboard::ClipboardEntry;

/// One picker row as sent over IPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/bindings/")]
pub struct EntryView {
    pub id: String,
    pub preview: String,
    pub content: String,
    /// Capture time, Unix epoch milliseconds
    #[ts(type = "number")]
    pub timestamp_ms: i64,
    /// Local `HH:MM:SS`
    pub time_label: String,
}

impl From<&ClipboardEntry> for EntryView {
    fn from(entry: &ClipboardEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            preview: entry.preview(),
            content: entry.content().to_string(),
            timestamp_ms: entry.timestamp_millis(),
            time_label: entry.time_label(),
        }
    }
}

// Cursor positioning types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../ui/bindings/")]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../ui/bindings/")]
pub struct ScreenBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenBounds {
    pub fn contains(&self, point: CursorPosition) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../ui/bindings/")]
pub struct WindowPosition {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_view_mirrors_entry() {
        let entry = ClipboardEntry::new("  hello\n world ".to_string());
        let view = EntryView::from(&entry);

        assert_eq!(view.id, entry.id().to_string());
        assert_eq!(view.preview, "hello world");
        assert_eq!(view.content, "  hello\n world ");
        assert_eq!(view.timestamp_ms, entry.timestamp_millis());
    }

    #[test]
    fn entry_view_serializes_camel_case() {
        let view = EntryView::from(&ClipboardEntry::new("x".to_string()));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("timestampMs").is_some());
        assert!(json.get("timeLabel").is_some());
    }

    #[test]
    fn screen_bounds_contains_is_half_open() {
        let screen = ScreenBounds {
            x: 100.0,
            y: 0.0,
            width: 200.0,
            height: 100.0,
        };
        assert!(screen.contains(CursorPosition { x: 100.0, y: 0.0 }));
        assert!(!screen.contains(CursorPosition { x: 300.0, y: 50.0 }));
        assert!(!screen.contains(CursorPosition { x: 99.0, y: 50.0 }));
    }
}
