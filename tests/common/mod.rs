//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a directory of session logs
pub struct SessionDirBuilder {
    temp_dir: TempDir,
}

impl SessionDirBuilder {
    /// Create a new builder with an empty directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `<stem>.jsonl` from records, one JSON line each
    pub fn with_session(self, stem: &str, records: &[RecordBuilder]) -> Self {
        let content = records.iter().map(RecordBuilder::to_json).collect::<Vec<_>>().join("\n");
        self.with_raw_session(stem, &content)
    }

    /// Write `<stem>.jsonl` with arbitrary content
    pub fn with_raw_session(self, stem: &str, content: &str) -> Self {
        self.with_file(&format!("{}.jsonl", stem), content.as_bytes())
    }

    /// Write any file relative to the directory
    pub fn with_file(self, name: &str, bytes: &[u8]) -> Self {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, bytes).expect("Failed to write session file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for SessionDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one session-log record
#[derive(Clone)]
pub struct RecordBuilder {
    record_type: String,
    role: String,
    content: Value,
    timestamp: Option<String>,
    cwd: Option<String>,
    is_meta: bool,
}

impl RecordBuilder {
    /// A user prompt with plain string content
    pub fn user(text: &str) -> Self {
        Self {
            record_type: "user".to_string(),
            role: "user".to_string(),
            content: Value::String(text.to_string()),
            timestamp: Some("2025-01-15T10:30:00Z".to_string()),
            cwd: Some("/home/dev/project".to_string()),
            is_meta: false,
        }
    }

    /// A user record whose content is a list of text segments
    pub fn user_segments(texts: &[&str]) -> Self {
        let segments: Vec<Value> =
            texts.iter().map(|t| json!({"type": "text", "text": t})).collect();
        Self { content: Value::Array(segments), ..Self::user("") }
    }

    /// A user record carrying only a tool result
    pub fn tool_result(output: &str) -> Self {
        let content =
            json!([{"type": "tool_result", "tool_use_id": "toolu_01", "content": output}]);
        Self { content, ..Self::user("") }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            record_type: "assistant".to_string(),
            role: "assistant".to_string(),
            content: json!([{"type": "text", "text": text}]),
            ..Self::user("")
        }
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    pub fn meta(mut self) -> Self {
        self.is_meta = true;
        self
    }

    pub fn to_json(&self) -> String {
        let mut record = json!({
            "type": self.record_type,
            "message": {"role": self.role, "content": self.content},
            "isMeta": self.is_meta,
        });
        if let Some(timestamp) = &self.timestamp {
            record["timestamp"] = Value::String(timestamp.clone());
        }
        if let Some(cwd) = &self.cwd {
            record["cwd"] = Value::String(cwd.clone());
        }
        record.to_string()
    }
}

/// Fake home containing `.claude/projects/<encoded>` directories
pub fn home_with_projects(projects: &[(&str, Vec<RecordBuilder>)]) -> (TempDir, PathBuf) {
    let home = TempDir::new().expect("Failed to create temp home");
    let projects_dir = home.path().join(".claude").join("projects");
    fs::create_dir_all(&projects_dir).expect("Failed to create projects dir");

    for (encoded, records) in projects {
        let project_dir = projects_dir.join(encoded);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        let content = records.iter().map(RecordBuilder::to_json).collect::<Vec<_>>().join("\n");
        fs::write(project_dir.join("session-1.jsonl"), content).expect("Failed to write session");
    }

    (home, projects_dir)
}
