use std::fmt;

use crate::models::{Prompt, PromptId};

/// Ordering of the visible sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Session load order, then position within the session
    #[default]
    Natural,
    /// Longest prompt first; equal lengths keep natural order
    LengthDescending,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Natural => write!(f, "natural"),
            SortMode::LengthDescending => write!(f, "by length"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightFilter {
    #[default]
    ShowAll,
    ShowHighlightedOnly,
}

impl HighlightFilter {
    pub fn admits(self, prompt: &Prompt) -> bool {
        match self {
            HighlightFilter::ShowAll => true,
            HighlightFilter::ShowHighlightedOnly => prompt.is_highlighted(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            HighlightFilter::ShowAll => HighlightFilter::ShowHighlightedOnly,
            HighlightFilter::ShowHighlightedOnly => HighlightFilter::ShowAll,
        }
    }
}

/// User-controlled view parameters; never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_query: String,
    pub sort_mode: SortMode,
    pub highlight_filter: HighlightFilter,
    pub selected: Option<PromptId>,
}

impl ViewState {
    /// True when nothing narrows or reorders the full collection
    pub fn is_default_view(&self) -> bool {
        self.search_query.is_empty()
            && self.sort_mode == SortMode::Natural
            && self.highlight_filter == HighlightFilter::ShowAll
    }
}
