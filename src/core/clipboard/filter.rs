use super::history::ClipboardEntry;

/// Entries whose content contains `query`, ignoring case.
///
/// The query is trimmed first; an empty query keeps everything. Display
/// order is preserved.
pub fn filter_entries<'a>(entries: &'a [ClipboardEntry], query: &str) -> Vec<&'a ClipboardEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| entry.content().to_lowercase().contains(&needle))
        .collect()
}
