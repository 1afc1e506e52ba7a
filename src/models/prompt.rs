use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of characters shown for a session id in compact listings
const SHORT_SESSION_ID_LEN: usize = 8;

/// Stable identity of a prompt: owning session plus its index within that session.
///
/// Serialized as `"<session_id>:<sequence_index>"` so it can be used as a JSON map key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PromptId {
    session_id: String,
    sequence_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid prompt id '{0}': expected <session_id>:<index>")]
pub struct ParsePromptIdError(String);

impl PromptId {
    pub fn new(session_id: impl Into<String>, sequence_index: usize) -> Self {
        Self { session_id: session_id.into(), sequence_index }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session_id, self.sequence_index)
    }
}

impl FromStr for PromptId {
    type Err = ParsePromptIdError;

    // Session ids are file stems and may contain ':', so split on the last one
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (session_id, index) =
            s.rsplit_once(':').ok_or_else(|| ParsePromptIdError(s.to_string()))?;
        if session_id.is_empty() {
            return Err(ParsePromptIdError(s.to_string()));
        }
        let sequence_index = index.parse().map_err(|_| ParsePromptIdError(s.to_string()))?;
        Ok(Self::new(session_id, sequence_index))
    }
}

impl From<PromptId> for String {
    fn from(id: PromptId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PromptId {
    type Error = ParsePromptIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A user-authored message extracted from a session log.
///
/// Everything except the highlight flag is fixed at construction; `length` and the
/// case-folded search key are derived from `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    id: PromptId,
    session_order: usize,
    timestamp: Option<DateTime<Utc>>,
    cwd: Option<String>,
    text: String,
    folded_text: String,
    length: usize,
    highlighted: bool,
}

impl Prompt {
    pub fn new(
        id: PromptId,
        session_order: usize,
        text: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
        cwd: Option<String>,
    ) -> Self {
        let text = text.into();
        let folded_text = text.to_lowercase();
        let length = text.chars().count();
        Self {
            id,
            session_order,
            timestamp,
            cwd,
            text,
            folded_text,
            length,
            highlighted: false,
        }
    }

    pub fn id(&self) -> &PromptId {
        &self.id
    }

    pub fn session_id(&self) -> &str {
        self.id.session_id()
    }

    /// First few characters of the session id, for list rows
    pub fn short_session_id(&self) -> &str {
        let session_id = self.id.session_id();
        match session_id.char_indices().nth(SHORT_SESSION_ID_LEN) {
            Some((byte_idx, _)) => &session_id[..byte_idx],
            None => session_id,
        }
    }

    pub fn sequence_index(&self) -> usize {
        self.id.sequence_index()
    }

    pub fn session_order(&self) -> usize {
        self.session_order
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character count of the prompt text
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Case-insensitive substring match; `folded_query` must already be lowercased
    pub fn matches_folded(&self, folded_query: &str) -> bool {
        folded_query.is_empty() || self.folded_text.contains(folded_query)
    }

    /// Natural order: session load order, then position in session, then timestamp
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.session_order
            .cmp(&other.session_order)
            .then_with(|| self.sequence_index().cmp(&other.sequence_index()))
            .then_with(|| self.timestamp.cmp(&other.timestamp))
    }
}
