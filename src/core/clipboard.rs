//! Clipboard module
//!
//! - `history`: bounded, de-duplicated entry list with cheap snapshots
//! - `store`: change detection on top of the history
//! - `monitor`: background thread polling the store
//! - `filter`: picker search

pub mod filter;
pub mod history;
pub mod monitor;
pub mod store;

pub use filter::filter_entries;
pub use history::{ClipboardEntry, HistoryList, HistorySnapshot, HISTORY_CAPACITY};
pub use monitor::ClipboardMonitor;
pub use store::{ClipboardStore, PollOutcome};
