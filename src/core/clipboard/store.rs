use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use super::history::{ClipboardEntry, HistoryList, HistorySnapshot};
use crate::shared::errors::ClipboardResult;
use crate::system::clipboard::SystemClipboard;

/// What a single poll tick decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// New (or re-observed) content was pushed to the front
    Inserted(ClipboardEntry),
    /// Clipboard still holds the last seen text
    Unchanged,
    /// Clipboard text is empty or whitespace only
    Blank,
    /// Clipboard holds no text representation
    NoText,
}

struct StoreState {
    history: HistoryList,
    last_seen: Option<String>,
}

/// Clipboard history plus change detection.
///
/// One mutex guards the history and the last seen text, so the poller and
/// the picker never observe a half-applied update.
pub struct ClipboardStore {
    clipboard: Arc<dyn SystemClipboard>,
    state: Mutex<StoreState>,
}

impl ClipboardStore {
    pub fn new(clipboard: Arc<dyn SystemClipboard>) -> Self {
        Self::with_history(clipboard, HistoryList::new())
    }

    pub fn with_history(clipboard: Arc<dyn SystemClipboard>, history: HistoryList) -> Self {
        Self {
            clipboard,
            state: Mutex::new(StoreState {
                history,
                last_seen: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("clipboard store mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// The clipboard this store samples; the picker writes selections back through it
    pub fn clipboard(&self) -> Arc<dyn SystemClipboard> {
        Arc::clone(&self.clipboard)
    }

    /// Sample the clipboard once.
    ///
    /// The OS read happens before the lock is taken. A read error leaves the
    /// history untouched and is handed back for the caller to log.
    pub fn poll(&self) -> ClipboardResult<PollOutcome> {
        let Some(current) = self.clipboard.read_text()? else {
            return Ok(PollOutcome::NoText);
        };

        if current.trim().is_empty() {
            return Ok(PollOutcome::Blank);
        }

        let mut state = self.state();
        if state.last_seen.as_deref() == Some(current.as_str()) {
            return Ok(PollOutcome::Unchanged);
        }

        let entry = ClipboardEntry::new(current.clone());
        if let Some(evicted) = state.history.upsert(entry.clone()) {
            tracing::trace!(id = %evicted.id(), "evicted oldest clipboard entry");
        }
        state.last_seen = Some(current);

        Ok(PollOutcome::Inserted(entry))
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        self.state().history.snapshot()
    }

    /// Empty the history. The last seen text is kept, so an unchanged
    /// clipboard is not re-added by the next tick.
    pub fn clear(&self) {
        self.state().history.clear();
    }

    pub fn find(&self, id: Uuid) -> Option<ClipboardEntry> {
        self.state().history.find(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().history.is_empty()
    }
}
