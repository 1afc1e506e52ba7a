//! Persistent highlight flags, scoped per session directory
//!
//! Highlights live outside the session logs so the logs stay untouched. One JSON file
//! per source directory:
//!
//! - `<data_dir>/highlights/<key>.json`, where `<key>` is derived from the canonical
//!   source directory path
//!
//! Default data directory: platform-specific data directories
//! - macOS: `~/Library/Application Support/prompt-history/`
//! - Linux: `~/.local/share/prompt-history/`
//! - Windows: `%APPDATA%\prompt-history\`
//!
//! Writes replace the file atomically; reads treat anything unusable as "no highlights".

pub mod metadata;
pub mod persistence;

pub use metadata::{HIGHLIGHTS_VERSION, HighlightFile, HighlightMap};
pub use persistence::HighlightStore;
