//! Session loading for coding-assistant history
//!
//! # Error Handling Strategy
//!
//! The loader combines graceful degradation with explicit diagnostics:
//!
//! - **Directory-level failures**: A missing or unlistable directory is the only fatal
//!   condition ([`crate::error::LoadError`]).
//!
//! - **File- and line-level failures**: Unreadable files and malformed lines are skipped
//!   and counted in [`LoadStats`], so one corrupt session never hides the others.
//!
//! - **Project discovery**: Resolves a project name to a session directory under
//!   `~/.claude/projects`; this is command-line glue and never touches session contents.

pub mod project_discovery;
pub mod sessions;

pub use project_discovery::{discover_projects, find_project_by_name};
pub use sessions::{LoadStats, SessionLoad, load_sessions};
