//! OS clipboard port
//!
//! Everything that touches the system pasteboard goes through
//! [`SystemClipboard`]. The app injects [`NativeClipboard`]; tests inject
//! [`MemoryClipboard`] so no real clipboard state is ever touched.

use cli_clipboard::{ClipboardContext, ClipboardProvider};

use crate::shared::errors::{ClipboardError, ClipboardResult};

/// Text access to a clipboard
pub trait SystemClipboard: Send + Sync {
    /// Current text representation, `None` when the clipboard holds no text
    fn read_text(&self) -> ClipboardResult<Option<String>>;

    /// Replace the full clipboard contents with `text`
    fn write_text(&self, text: &str) -> ClipboardResult<()>;
}

/// System clipboard via `cli-clipboard`.
///
/// A fresh context is opened per call: the platform contexts are not `Send`,
/// and the poller and the IPC handlers live on different threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeClipboard;

impl NativeClipboard {
    pub fn new() -> Self {
        Self
    }

    fn context() -> ClipboardResult<ClipboardContext> {
        ClipboardContext::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

impl SystemClipboard for NativeClipboard {
    fn read_text(&self) -> ClipboardResult<Option<String>> {
        let mut ctx = Self::context()?;
        match ctx.get_contents() {
            Ok(text) => Ok(Some(text)),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }

    fn write_text(&self, text: &str) -> ClipboardResult<()> {
        let mut ctx = Self::context()?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

#[cfg(test)]
pub use fake::MemoryClipboard;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_reads_what_was_written() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.read_text().unwrap(), None);

        clipboard.write_text("hello").unwrap();
        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some("hello"));
        assert_eq!(clipboard.writes(), vec!["hello".to_string()]);
    }

    #[test]
    fn memory_clipboard_injected_failure_is_one_shot() {
        let clipboard = MemoryClipboard::with_text("x");
        clipboard.fail_next_read("locked");

        assert!(matches!(
            clipboard.read_text(),
            Err(ClipboardError::Unavailable(_))
        ));
        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some("x"));
        assert_eq!(clipboard.read_count(), 2);
    }
}
