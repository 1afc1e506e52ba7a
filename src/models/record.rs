use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;

/// One line of a session log, as far as prompt extraction cares.
///
/// Unknown fields are ignored. Records without a `message` (summaries, file snapshots)
/// still decode so the parser can classify them instead of treating them as corrupt.
/// Optional fields of the wrong type read as absent rather than failing the record.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub message: Option<RecordMessage>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_string"
    )]
    pub cwd: Option<String>,
    #[serde(
        rename = "isMeta",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_lenient_bool"
    )]
    pub is_meta: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordMessage {
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_string"
    )]
    pub role: Option<String>,
    #[serde(default)]
    pub content: MessageContent,
}

/// Message content is either a plain string or an ordered list of segments
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Segments(Vec<ContentSegment>),
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A single entry of a segment list. Older logs occasionally carry bare strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentSegment {
    Bare(String),
    Typed(SegmentKind),
    /// Numbers, nulls, objects without a usable `type`
    Other(IgnoredAny),
}

/// Closed set of segment kinds. Anything unrecognized lands in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentKind {
    Text { text: String },
    ToolUse,
    ToolResult,
    Image,
    Document,
    Thinking,
    #[serde(other)]
    Unknown,
}

impl ContentSegment {
    /// Text contributed by this segment, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Bare(text) | Self::Typed(SegmentKind::Text { text }) => Some(text),
            Self::Typed(_) | Self::Other(_) => None,
        }
    }
}

impl MessageContent {
    /// Flatten to plain text: strings verbatim, segment lists joined by newline
    pub fn flatten(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Segments(segments) => {
                let parts: Vec<&str> = segments.iter().filter_map(ContentSegment::text).collect();
                parts.join("\n")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_plain_string() {
        let content: MessageContent = serde_json::from_str(r#""just a string""#).unwrap();
        assert_eq!(content.flatten(), "just a string");
    }

    #[test]
    fn test_flatten_joins_text_segments_in_order() {
        let content: MessageContent = serde_json::from_str(
            r#"[{"type":"text","text":"first"},{"type":"image","source":{"type":"base64","data":"AAAA"}},{"type":"text","text":"second"}]"#,
        )
        .unwrap();
        assert_eq!(content.flatten(), "first\nsecond");
    }

    #[test]
    fn test_flatten_ignores_tool_segments() {
        let content: MessageContent = serde_json::from_str(
            r#"[{"type":"tool_result","tool_use_id":"toolu_1","content":"output"},{"type":"tool_use","id":"toolu_2","name":"Read","input":{}}]"#,
        )
        .unwrap();
        assert_eq!(content.flatten(), "");
    }

    #[test]
    fn test_unknown_segment_kind_is_tolerated() {
        let content: MessageContent = serde_json::from_str(
            r#"[{"type":"server_tool_use","id":"x"},{"type":"text","text":"kept"}]"#,
        )
        .unwrap();
        match &content {
            MessageContent::Segments(segments) => {
                assert!(matches!(segments[0], ContentSegment::Typed(SegmentKind::Unknown)));
            }
            MessageContent::Text(_) => panic!("expected segments"),
        }
        assert_eq!(content.flatten(), "kept");
    }

    #[test]
    fn test_bare_string_segments_count_as_text() {
        let content: MessageContent =
            serde_json::from_str(r#"["bare", {"type":"text","text":"typed"}]"#).unwrap();
        assert_eq!(content.flatten(), "bare\ntyped");
    }

    #[test]
    fn test_odd_segments_are_ignored() {
        let content: MessageContent = serde_json::from_str(
            r#"[{"type":"text","text":"kept"},{"kind":"x"},42,null,{"type":"text"}]"#,
        )
        .unwrap();
        match &content {
            MessageContent::Segments(segments) => {
                assert_eq!(segments.len(), 5);
                assert!(segments[1..].iter().all(|s| matches!(s, ContentSegment::Other(_))));
            }
            MessageContent::Text(_) => panic!("expected segments"),
        }
        assert_eq!(content.flatten(), "kept");
    }

    #[test]
    fn test_wrongly_typed_optional_fields_read_as_absent() {
        let record: SessionRecord = serde_json::from_str(
            r#"{"type":"user","cwd":7,"isMeta":null,"message":{"role":["user"],"content":"x"}}"#,
        )
        .unwrap();
        assert!(record.cwd.is_none());
        assert!(!record.is_meta);
        assert!(record.message.unwrap().role.is_none());

        let record: SessionRecord =
            serde_json::from_str(r#"{"type":"user","isMeta":"true"}"#).unwrap();
        assert!(!record.is_meta);
    }

    #[test]
    fn test_record_without_message_decodes() {
        let record: SessionRecord =
            serde_json::from_str(r#"{"type":"summary","summary":"Fix things","leafUuid":"x"}"#)
                .unwrap();
        assert_eq!(record.record_type, "summary");
        assert!(record.message.is_none());
        assert!(record.timestamp.is_none());
        assert!(!record.is_meta);
    }
}
