use anyhow::Result;
use tracing::debug;

use super::prompt_view::PromptView;
use super::state::SortMode;

/// User intents understood by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    ToggleHighlightCurrent,
    ToggleShowHighlightedOnly,
    /// Empty search and show all; sort mode unchanged
    ResetFilters,
    SortByLength,
    SortByNatural,
    SetSearchText(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Apply one action to the view
///
/// Errors only come from persisting a highlight toggle; the view is still consistent
/// afterwards and the caller may keep going.
pub fn dispatch(view: &mut PromptView, action: ViewAction) -> Result<ControlFlow> {
    debug!(?action, "Dispatching view action");

    match action {
        ViewAction::ToggleHighlightCurrent => {
            view.toggle_highlight_selected()?;
        }
        ViewAction::ToggleShowHighlightedOnly => {
            let filter = view.state().highlight_filter.toggled();
            view.set_highlight_filter(filter);
        }
        ViewAction::ResetFilters => view.reset_filters(),
        ViewAction::SortByLength => view.set_sort(SortMode::LengthDescending),
        ViewAction::SortByNatural => view.set_sort(SortMode::Natural),
        ViewAction::SetSearchText(text) => view.set_search(text),
        ViewAction::Quit => return Ok(ControlFlow::Quit),
    }

    Ok(ControlFlow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Prompt, PromptId};
    use crate::view::HighlightFilter;

    fn view() -> PromptView {
        PromptView::new(vec![
            Prompt::new(PromptId::new("a", 0), 0, "hello world", None, None),
            Prompt::new(PromptId::new("a", 1), 0, "short", None, None),
            Prompt::new(PromptId::new("b", 0), 1, "Hello again", None, None),
        ])
    }

    fn run(view: &mut PromptView, action: ViewAction) -> ControlFlow {
        dispatch(view, action).unwrap()
    }

    #[test]
    fn test_quit_stops_without_touching_state() {
        let mut view = view();
        assert_eq!(run(&mut view, ViewAction::Quit), ControlFlow::Quit);
        assert!(view.state().is_default_view());
    }

    #[test]
    fn test_highlight_then_filter_then_reset() {
        let mut view = view();
        run(&mut view, ViewAction::SortByLength);
        assert_eq!(run(&mut view, ViewAction::ToggleHighlightCurrent), ControlFlow::Continue);
        let highlighted = view.selected().unwrap().id().clone();

        run(&mut view, ViewAction::ToggleShowHighlightedOnly);
        let visible: Vec<&PromptId> = view.visible().iter().map(|p| p.id()).collect();
        assert_eq!(visible, vec![&highlighted]);

        run(&mut view, ViewAction::SetSearchText("xyz".to_string()));
        run(&mut view, ViewAction::ResetFilters);
        assert_eq!(view.state().search_query, "");
        assert_eq!(view.state().highlight_filter, HighlightFilter::ShowAll);
        assert_eq!(view.state().sort_mode, SortMode::LengthDescending);
        assert_eq!(view.visible_len(), 3);
    }

    #[test]
    fn test_toggle_show_highlighted_only_flips() {
        let mut view = view();
        run(&mut view, ViewAction::ToggleShowHighlightedOnly);
        assert_eq!(view.state().highlight_filter, HighlightFilter::ShowHighlightedOnly);
        assert_eq!(view.visible_len(), 0);
        run(&mut view, ViewAction::ToggleShowHighlightedOnly);
        assert_eq!(view.state().highlight_filter, HighlightFilter::ShowAll);
    }

    #[test]
    fn test_search_then_length_sort_ties_keep_natural_order() {
        let mut view = view();
        run(&mut view, ViewAction::SetSearchText("hello".to_string()));
        run(&mut view, ViewAction::SortByLength);
        let texts: Vec<&str> = view.visible().iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["hello world", "Hello again"]);

        run(&mut view, ViewAction::SortByNatural);
        assert_eq!(view.state().sort_mode, SortMode::Natural);
    }
}
