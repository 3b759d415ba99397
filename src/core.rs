//! Platform-independent logic: history store, poller, picker placement and
//! the hotkey model

pub mod clipboard;
pub mod hotkey;
pub mod placement;
