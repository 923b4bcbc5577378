//! Shared building blocks for the workspace: message channels, debug logging
//! and JSON settings files.

pub mod channels;
pub mod debug_log;
pub mod eprint_and_exit;
pub mod saved_file;
