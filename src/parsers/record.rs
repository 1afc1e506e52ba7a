use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::SessionRecord;

const RECORD_TYPE_USER: &str = "user";
const ROLE_USER: &str = "user";

/// A prompt extracted from one line, before the loader assigns its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCandidate {
    pub text: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub cwd: Option<String>,
}

/// Why a line did not produce a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only line
    Blank,
    /// Not JSON, or JSON that does not fit the record schema
    Malformed,
    /// Assistant replies, summaries, snapshots, meta records, ...
    NotUserAuthored,
    /// User record whose content has no text once flattened
    NoText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Prompt(PromptCandidate),
    Skip(SkipReason),
}

/// Parse one raw session-log line into a prompt candidate.
///
/// Pure and infallible: every failure mode is reported as [`ParseOutcome::Skip`].
pub fn parse_record_line(line: &str) -> ParseOutcome {
    if line.trim().is_empty() {
        return ParseOutcome::Skip(SkipReason::Blank);
    }

    // Pre-filter on the discriminator before committing to the full schema, so that
    // unrelated record types with exotic shapes are classified rather than rejected
    let value = match serde_json::from_str::<Value>(line) {
        Ok(value) => value,
        Err(_) => return ParseOutcome::Skip(SkipReason::Malformed),
    };

    let Some(record_type) = value.get("type").and_then(Value::as_str) else {
        return ParseOutcome::Skip(SkipReason::Malformed);
    };
    if record_type != RECORD_TYPE_USER {
        return ParseOutcome::Skip(SkipReason::NotUserAuthored);
    }

    let record = match serde_json::from_value::<SessionRecord>(value) {
        Ok(record) => record,
        Err(_) => return ParseOutcome::Skip(SkipReason::Malformed),
    };

    parse_record(record)
}

/// Classify an already-decoded record
pub fn parse_record(record: SessionRecord) -> ParseOutcome {
    if record.record_type != RECORD_TYPE_USER || record.is_meta {
        return ParseOutcome::Skip(SkipReason::NotUserAuthored);
    }
    let Some(message) = record.message else {
        return ParseOutcome::Skip(SkipReason::NotUserAuthored);
    };
    if message.role.as_deref() != Some(ROLE_USER) {
        return ParseOutcome::Skip(SkipReason::NotUserAuthored);
    }

    let flattened = message.content.flatten();
    let text = flattened.trim();
    if text.is_empty() {
        return ParseOutcome::Skip(SkipReason::NoText);
    }

    ParseOutcome::Prompt(PromptCandidate {
        text: text.to_string(),
        timestamp: record.timestamp,
        cwd: record.cwd,
    })
}
