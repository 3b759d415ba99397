use std::ops::Deref;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

/// Maximum number of clipboard entries kept in memory
pub const HISTORY_CAPACITY: usize = 50;

/// Number of user-perceived characters shown before the preview is cut
pub const PREVIEW_LEN: usize = 60;

/// One captured clipboard text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    id: Uuid,
    content: String,
    captured_at: DateTime<Utc>,
}

impl ClipboardEntry {
    /// Capture `content` now
    pub fn new(content: String) -> Self {
        Self::captured_at(content, Utc::now())
    }

    pub fn captured_at(content: String, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            captured_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Capture instant in milliseconds since the Unix epoch
    pub fn timestamp_millis(&self) -> i64 {
        self.captured_at.timestamp_millis()
    }

    /// Whitespace-collapsed, truncated view of the content
    pub fn preview(&self) -> String {
        preview_of(&self.content)
    }

    /// `HH:MM:SS` in the local timezone, as shown under each picker row
    pub fn time_label(&self) -> String {
        self.captured_at
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Build the single-line preview for a clipboard text.
///
/// Content of at most `PREVIEW_LEN` graphemes is only whitespace-collapsed.
/// Longer content is cut first, then collapsed, then suffixed with `...`.
pub fn preview_of(content: &str) -> String {
    match content.grapheme_indices(true).nth(PREVIEW_LEN) {
        None => collapse_whitespace(content),
        Some((cut, _)) => format!("{}...", collapse_whitespace(&content[..cut])),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bounded, de-duplicated clipboard history, most recent first.
///
/// Entries sit behind an `Arc` so a snapshot is a pointer copy; mutations
/// clone the backing vector only while an older snapshot is still alive.
#[derive(Debug, Clone)]
pub struct HistoryList {
    entries: Arc<Vec<ClipboardEntry>>,
    capacity: usize,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// History bounded to `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Vec::with_capacity(capacity.max(1))),
            capacity: capacity.max(1),
        }
    }

    /// Insert `entry` at the front.
    ///
    /// Any older entry with identical content is removed first. Returns the
    /// entry evicted from the tail when the list was already full.
    pub fn upsert(&mut self, entry: ClipboardEntry) -> Option<ClipboardEntry> {
        let entries = Arc::make_mut(&mut self.entries);
        entries.retain(|existing| existing.content != entry.content);
        entries.insert(0, entry);

        if entries.len() > self.capacity {
            entries.pop()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries = Arc::new(Vec::new());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn find(&self, id: Uuid) -> Option<&ClipboardEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Point-in-time view that later mutations never touch
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot(Arc::clone(&self.entries))
    }
}

impl Default for HistoryList {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable copy of the history handed to readers
#[derive(Debug, Clone, Default)]
pub struct HistorySnapshot(Arc<Vec<ClipboardEntry>>);

impl HistorySnapshot {
    /// Contents in display order
    pub fn contents(&self) -> Vec<&str> {
        self.0.iter().map(ClipboardEntry::content).collect()
    }

    pub fn find(&self, id: Uuid) -> Option<&ClipboardEntry> {
        self.0.iter().find(|entry| entry.id == id)
    }
}

impl Deref for HistorySnapshot {
    type Target = [ClipboardEntry];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> ClipboardEntry {
        ClipboardEntry::new(text.to_string())
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = HistoryList::new();
        history.upsert(entry("First item"));
        history.upsert(entry("Second item"));

        assert_eq!(history.snapshot().contents(), vec!["Second item", "First item"]);
    }

    #[test]
    fn test_duplicate_moves_to_front() {
        let mut history = HistoryList::new();
        history.upsert(entry("a"));
        history.upsert(entry("b"));
        history.upsert(entry("c"));
        history.upsert(entry("a"));

        assert_eq!(history.snapshot().contents(), vec!["a", "c", "b"]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryList::new();
        let mut evicted = Vec::new();
        for i in 1..=51 {
            if let Some(old) = history.upsert(entry(&format!("s{}", i))) {
                evicted.push(old);
            }
        }

        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), HISTORY_CAPACITY);
        assert_eq!(snapshot[0].content(), "s51");
        assert_eq!(snapshot[HISTORY_CAPACITY - 1].content(), "s2");
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].content(), "s1");
    }

    #[test]
    fn test_reinsert_at_capacity_does_not_evict() {
        let mut history = HistoryList::with_capacity(3);
        history.upsert(entry("x"));
        history.upsert(entry("y"));
        history.upsert(entry("z"));

        assert!(history.upsert(entry("x")).is_none());
        assert_eq!(history.snapshot().contents(), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_snapshot_is_stable_across_mutation() {
        let mut history = HistoryList::new();
        history.upsert(entry("before"));
        let snapshot = history.snapshot();

        history.upsert(entry("after"));
        history.clear();

        assert_eq!(snapshot.contents(), vec!["before"]);
        assert!(history.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let mut history = HistoryList::new();
        let kept = entry("keep me");
        let id = kept.id();
        history.upsert(kept);
        history.upsert(entry("other"));

        assert_eq!(history.find(id).map(ClipboardEntry::content), Some("keep me"));
        assert!(history.find(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview_of("  hello\n\tworld  "), "hello world");
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "word ".repeat(20);
        let preview = preview_of(&long);

        assert!(preview.ends_with("..."));
        // 60 chars of "word word ..." end on a space, which gets trimmed
        assert_eq!(preview, format!("{}...", "word ".repeat(12).trim_end()));
    }

    #[test]
    fn test_preview_exactly_at_limit_has_no_ellipsis() {
        let exact = "x".repeat(PREVIEW_LEN);
        assert_eq!(preview_of(&exact), exact);
    }

    #[test]
    fn test_preview_counts_graphemes() {
        // Each flag is two code points but one grapheme
        let flags = "🇯🇵".repeat(PREVIEW_LEN + 5);
        let preview = preview_of(&flags);

        assert_eq!(preview, format!("{}...", "🇯🇵".repeat(PREVIEW_LEN)));
    }

    #[test]
    fn test_time_label_format() {
        let label = entry("t").time_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }
}
