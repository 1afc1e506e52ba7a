//! Search, sort and highlight-filter state over a loaded prompt collection
//!
//! [`PromptView`] owns the prompts and derives the visible sequence from its
//! [`ViewState`]; [`controller::dispatch`] is the single entry point the TUI uses to
//! mutate it.

pub mod controller;
pub mod prompt_view;
pub mod state;

pub use controller::{ControlFlow, ViewAction, dispatch};
pub use prompt_view::PromptView;
pub use state::{HighlightFilter, SortMode, ViewState};
