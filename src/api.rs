//! IPC surface exposed to the picker webview

pub mod commands;
