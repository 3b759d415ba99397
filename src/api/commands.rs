//! Tauri command modules
//!
//! - `history`: listing, pasting and clearing clipboard entries
//! - `window`: showing and hiding the picker
//! - `settings`: in-memory settings
//! - `system`: monitor status and accessibility checks

pub mod history;
pub mod settings;
pub mod system;
pub mod window;
