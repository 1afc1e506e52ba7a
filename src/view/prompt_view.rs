use std::collections::HashMap;

use anyhow::Result;

use super::state::{HighlightFilter, SortMode, ViewState};
use crate::highlights::persistence::toggle;
use crate::highlights::{HighlightMap, HighlightStore};
use crate::models::{Prompt, PromptId};

/// A prompt collection plus the state that selects and orders what is visible
///
/// Membership is fixed at construction; only highlight flags and [`ViewState`] change.
/// The visible sequence is recomputed eagerly after every mutation, so reads are cheap.
#[derive(Debug)]
pub struct PromptView {
    /// Kept in natural order
    prompts: Vec<Prompt>,
    positions: HashMap<PromptId, usize>,
    state: ViewState,
    /// Indices into `prompts`, in display order
    visible: Vec<usize>,
    /// Full persisted mapping, including ids absent from this collection
    highlights: HighlightMap,
    store: Option<HighlightStore>,
}

impl PromptView {
    /// In-memory view; highlight toggles are not persisted
    pub fn new(prompts: Vec<Prompt>) -> Self {
        let highlights =
            prompts.iter().filter(|p| p.is_highlighted()).map(|p| (p.id().clone(), true)).collect();
        Self::build(prompts, highlights, None)
    }

    /// View backed by a highlight store; persisted flags are applied immediately
    pub fn with_store(prompts: Vec<Prompt>, store: HighlightStore) -> Self {
        let highlights = store.load();
        Self::build(prompts, highlights, Some(store))
    }

    fn build(
        mut prompts: Vec<Prompt>,
        highlights: HighlightMap,
        store: Option<HighlightStore>,
    ) -> Self {
        prompts.sort_by(Prompt::natural_cmp);
        for prompt in &mut prompts {
            let flag = highlights.get(prompt.id()).copied().unwrap_or(false);
            prompt.set_highlighted(flag);
        }
        let positions: HashMap<PromptId, usize> =
            prompts.iter().enumerate().map(|(i, p)| (p.id().clone(), i)).collect();
        debug_assert_eq!(positions.len(), prompts.len(), "prompt ids must be unique");

        let mut view = Self {
            prompts,
            positions,
            state: ViewState::default(),
            visible: Vec::new(),
            highlights,
            store,
        };
        view.recompute();
        view
    }

    /// Visible prompts in display order
    pub fn visible(&self) -> Vec<&Prompt> {
        self.visible.iter().map(|&i| &self.prompts[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn total_len(&self) -> usize {
        self.prompts.len()
    }

    /// Highlighted prompts in the loaded collection
    pub fn highlighted_count(&self) -> usize {
        self.prompts.iter().filter(|p| p.is_highlighted()).count()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Every loaded prompt in natural order, regardless of view state
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn highlights(&self) -> &HighlightMap {
        &self.highlights
    }

    pub fn store(&self) -> Option<&HighlightStore> {
        self.store.as_ref()
    }

    pub fn get(&self, id: &PromptId) -> Option<&Prompt> {
        self.positions.get(id).map(|&i| &self.prompts[i])
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.search_query = text.into();
        self.recompute();
    }

    pub fn set_sort(&mut self, mode: SortMode) {
        self.state.sort_mode = mode;
        self.recompute();
    }

    pub fn set_highlight_filter(&mut self, filter: HighlightFilter) {
        self.state.highlight_filter = filter;
        self.recompute();
    }

    /// Clear the search and show everything; the sort mode is kept
    pub fn reset_filters(&mut self) {
        self.state.search_query.clear();
        self.state.highlight_filter = HighlightFilter::ShowAll;
        self.recompute();
    }

    /// Flip the highlight flag of one prompt
    ///
    /// Returns `Ok(None)` for an id outside the collection. When a store is attached the
    /// full mapping is saved; a failed save leaves the new flag in place and returns the
    /// error.
    pub fn toggle_highlight(&mut self, id: &PromptId) -> Result<Option<bool>> {
        let Some(&position) = self.positions.get(id) else {
            return Ok(None);
        };

        let persisted = match &self.store {
            Some(store) => store.toggle_and_persist(&mut self.highlights, id).map(|_| ()),
            None => {
                toggle(&mut self.highlights, id);
                Ok(())
            }
        };

        let now_highlighted = self.highlights.get(id).copied().unwrap_or(false);
        self.prompts[position].set_highlighted(now_highlighted);
        self.recompute();

        persisted.map(|()| Some(now_highlighted))
    }

    /// Toggle the selected prompt; `Ok(None)` when nothing is selected
    pub fn toggle_highlight_selected(&mut self) -> Result<Option<bool>> {
        match self.state.selected.clone() {
            Some(id) => self.toggle_highlight(&id),
            None => Ok(None),
        }
    }

    /// Move the selection by `delta` display positions, clamped to the visible range
    pub fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let current = self.selected_index().unwrap_or(0);
        let last = self.visible.len() - 1;
        let target = current.saturating_add_signed(delta).min(last);
        self.state.selected = Some(self.prompts[self.visible[target]].id().clone());
    }

    /// Select a visible prompt; returns false (selection unchanged) otherwise
    pub fn select(&mut self, id: &PromptId) -> bool {
        let is_visible = self.positions.get(id).is_some_and(|i| self.visible.contains(i));
        if is_visible {
            self.state.selected = Some(id.clone());
        }
        is_visible
    }

    pub fn selected(&self) -> Option<&Prompt> {
        self.state.selected.as_ref().and_then(|id| self.get(id))
    }

    /// Display position of the selection
    pub fn selected_index(&self) -> Option<usize> {
        let position = *self.positions.get(self.state.selected.as_ref()?)?;
        self.visible.iter().position(|&i| i == position)
    }

    fn recompute(&mut self) {
        let query = self.state.search_query.to_lowercase();
        let filter = self.state.highlight_filter;

        let mut visible: Vec<usize> = self
            .prompts
            .iter()
            .enumerate()
            .filter(|(_, p)| filter.admits(p) && p.matches_folded(&query))
            .map(|(i, _)| i)
            .collect();

        // `prompts` is already in natural order and sort_by is stable
        if self.state.sort_mode == SortMode::LengthDescending {
            let prompts = &self.prompts;
            visible.sort_by(|&a, &b| prompts[b].length().cmp(&prompts[a].length()));
        }

        let still_visible = self
            .state
            .selected
            .as_ref()
            .and_then(|id| self.positions.get(id))
            .is_some_and(|i| visible.contains(i));
        if !still_visible {
            self.state.selected = visible.first().map(|&i| self.prompts[i].id().clone());
        }

        self.visible = visible;
    }
}
