//! Prompt History - browse the prompts you sent in Claude Code sessions
//!
//! This library reads a directory of session logs (`*.jsonl`, one conversation per
//! file), extracts the user-authored prompts, and exposes them through a searchable,
//! sortable view with persistent highlights. It supports:
//!
//! - Parsing session-log lines into prompts, skipping everything else
//! - Loading a whole session directory with per-file fault isolation
//! - Persisting highlight flags per directory, outside the logs
//! - Case-insensitive search, length sorting and a highlighted-only filter
//!
//! # Example
//!
//! ```no_run
//! use prompt_history::{PromptView, ViewAction, dispatch, load_sessions};
//! use std::path::Path;
//!
//! let load = load_sessions(Path::new("/home/alice/.claude/projects/-home-alice-api"))?;
//! let mut view = PromptView::new(load.prompts);
//! dispatch(&mut view, ViewAction::SetSearchText("refactor".to_string()))?;
//! println!("{} matching prompts", view.visible_len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod error;
pub mod highlights;
pub mod loader;
pub mod models;
pub mod parsers;
pub mod tui;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use error::{LoadError, LoadWarning, ResolveError};
pub use highlights::{HighlightMap, HighlightStore};
pub use loader::{LoadStats, SessionLoad, load_sessions};
pub use models::{Prompt, PromptId};
pub use parsers::{ParseOutcome, PromptCandidate, SkipReason, parse_record_line};
pub use utils::format_path_with_tilde;
pub use view::{ControlFlow, HighlightFilter, PromptView, SortMode, ViewAction, ViewState, dispatch};
