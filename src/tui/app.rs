//! TUI application state and event handling.
//!
//! [`App`] wraps a [`PromptView`] with the pieces only the terminal needs:
//!
//! - **Focus**: plain keys either edit the search box or drive the list
//! - **Search input**: each edit is forwarded as [`ViewAction::SetSearchText`]
//! - **Status messages**: transient feedback for highlight toggles and save errors
//! - **Dirty state tracking**: redraw only when something changed
//!
//! # Example
//!
//! ```rust,ignore
//! let view = PromptView::with_store(load.prompts, store);
//! let mut app = App::new(view);
//! app.run(&mut terminal)?;
//! ```

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::widgets::ListState;

use super::events::{Action, Focus, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::view::{ControlFlow, PromptView, ViewAction, dispatch};

/// Maximum search length in characters
pub const MAX_SEARCH_CHARS: usize = 256;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 2000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App {
    view: PromptView,
    focus: Focus,
    search_input: String,
    should_quit: bool,
    list_state: ListState,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(view: PromptView) -> Self {
        let search_input = view.state().search_query.clone();
        Self {
            view,
            focus: Focus::default(),
            search_input,
            should_quit: false,
            list_state: ListState::default(),
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    pub fn view(&self) -> &PromptView {
        &self.view
    }

    /// Hand the view back once the loop ends
    pub fn into_view(self) -> PromptView {
        self.view
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let stale = now.duration_since(self.last_draw_time) >= Duration::from_millis(100);
            if self.needs_redraw || stale {
                self.draw(terminal)?;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100), self.focus)?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let state = RenderState {
            view: &self.view,
            focus: self.focus,
            search_input: &self.search_input,
            status_message: self.status_message.as_ref(),
        };
        let list_state = &mut self.list_state;
        terminal.draw(|f| render_ui(f, &state, list_state))?;
        self.needs_redraw = false;
        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::View(view_action) => self.apply(view_action),
            Action::MoveSelection(delta) => {
                let before = self.view.selected_index();
                self.view.move_selection(delta);
                if before != self.view.selected_index() {
                    self.needs_redraw = true;
                }
            }
            Action::FocusSearch => self.set_focus(Focus::Search),
            Action::FocusList => self.set_focus(Focus::List),
            Action::InsertChar(c) => {
                if self.search_input.chars().count() < MAX_SEARCH_CHARS {
                    self.search_input.push(c);
                    self.apply(ViewAction::SetSearchText(self.search_input.clone()));
                }
            }
            Action::DeleteChar => {
                if self.search_input.pop().is_some() {
                    self.apply(ViewAction::SetSearchText(self.search_input.clone()));
                }
            }
            Action::None => {}
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.needs_redraw = true;
        }
    }

    fn apply(&mut self, action: ViewAction) {
        let is_toggle = action == ViewAction::ToggleHighlightCurrent;
        let target = self.view.selected().map(|p| p.id().clone());

        match dispatch(&mut self.view, action) {
            Ok(ControlFlow::Quit) => self.should_quit = true,
            Ok(ControlFlow::Continue) => {
                if is_toggle && let Some(id) = target {
                    let now_highlighted = self.view.get(&id).is_some_and(|p| p.is_highlighted());
                    let text = if now_highlighted { "★ Highlighted" } else { "Highlight removed" };
                    self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
                }
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Failed to save highlights: {:#}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }

        // Reset clears the search box too
        if self.search_input != self.view.state().search_query {
            self.search_input = self.view.state().search_query.clone();
        }
        self.needs_redraw = true;
    }
}
