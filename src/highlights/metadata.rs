//! On-disk format of a highlight file

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::PromptId;

/// Schema version, bumped on incompatible format changes
pub const HIGHLIGHTS_VERSION: u32 = 1;

/// Highlight flags keyed by prompt identity
pub type HighlightMap = BTreeMap<PromptId, bool>;

/// Top-level structure of a highlight file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightFile {
    pub version: u32,
    /// Canonical source directory, checked on load to catch key collisions
    pub directory: PathBuf,
    #[serde(default)]
    pub highlights: HighlightMap,
}

impl HighlightFile {
    pub fn new(directory: PathBuf, highlights: HighlightMap) -> Self {
        Self { version: HIGHLIGHTS_VERSION, directory, highlights }
    }
}
