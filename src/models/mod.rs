//! Data models for coding-assistant session logs.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`SessionRecord`] - One decoded line of a session `.jsonl` file
//! - [`ContentSegment`] - Closed set of content segment kinds inside a record
//! - [`Prompt`] - A normalized user prompt with a stable [`PromptId`]
//! - [`ProjectInfo`] - A discovered project directory under `~/.claude/projects`
//!
//! Record models use serde for JSON deserialization with a lenient timestamp
//! deserializer from the `parsers::deserializers` module.

pub mod project;
pub mod prompt;
pub mod record;

pub use project::ProjectInfo;
pub use prompt::{ParsePromptIdError, Prompt, PromptId};
pub use record::{ContentSegment, MessageContent, RecordMessage, SegmentKind, SessionRecord};
