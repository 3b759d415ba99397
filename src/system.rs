//! OS-facing adapters for the clipboard, automation, dialogs, notifications,
//! hotkey, tray and the picker window

pub mod automation;
pub mod clipboard;
pub mod dialog;
pub mod hotkey;
pub mod notify;
pub mod tray;
pub mod window;
