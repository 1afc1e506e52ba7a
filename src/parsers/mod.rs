//! Line-level parser for session `.jsonl` logs
//!
//! # Error Handling Strategy
//!
//! Parsing never fails. Every line maps to a [`ParseOutcome`]:
//!
//! - **Prompt**: a user-authored record with non-empty text
//! - **Skip**: blank, malformed, non-user, or empty after flattening, tagged with a
//!   [`SkipReason`] so the loader can aggregate diagnostic counts
//!
//! A single bad line never affects its neighbours; counting and reporting happen one
//! level up in the session loader.

pub mod deserializers;
pub mod record;

pub use record::{ParseOutcome, PromptCandidate, SkipReason, parse_record_line};
