use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::settings::AppSettings;
use super::types::EntryView;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload")]
#[ts(export, export_to = "../ui/bindings/")]
pub enum AppEvent {
    #[serde(rename = "clipboard://updated")]
    ClipboardUpdated(EntryView),

    #[serde(rename = "clipboard://cleared")]
    ClipboardCleared,

    #[serde(rename = "settings://updated")]
    SettingsUpdated(AppSettings),
}

impl AppEvent {
    /// Channel name the webview listens on
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::ClipboardUpdated(_) => "clipboard://updated",
            AppEvent::ClipboardCleared => "clipboard://cleared",
            AppEvent::SettingsUpdated(_) => "settings://updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::ClipboardEntry;

    #[test]
    fn event_names_match_serde_tags() {
        let events = [
            AppEvent::ClipboardUpdated(EntryView::from(&ClipboardEntry::new("x".to_string()))),
            AppEvent::ClipboardCleared,
            AppEvent::SettingsUpdated(AppSettings::default()),
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.name());
        }
    }
}
