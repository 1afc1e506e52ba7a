use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::view::ViewAction;

/// Rows moved by PageUp/PageDown
pub const PAGE_SIZE: isize = 10;

/// Which pane receives plain keystrokes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Search,
}

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    /// Forwarded to the view controller
    View(ViewAction),
    MoveSelection(isize),
    FocusSearch,
    FocusList,
    InsertChar(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, focus: Focus) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        return Ok(key_to_action(key, focus));
    }
    Ok(Action::None)
}

pub fn key_to_action(key: KeyEvent, focus: Focus) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::View(ViewAction::Quit);
    }

    match focus {
        Focus::Search => search_key_to_action(key),
        Focus::List => list_key_to_action(key),
    }
}

fn search_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down, _) => Action::FocusList,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InsertChar(c)
        }
        _ => Action::None,
    }
}

fn list_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::View(ViewAction::Quit),

        // Navigation
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveSelection(-1),
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveSelection(1),
        (KeyCode::PageUp, _) => Action::MoveSelection(-PAGE_SIZE),
        (KeyCode::PageDown, _) => Action::MoveSelection(PAGE_SIZE),

        // View actions
        (KeyCode::Char('h'), KeyModifiers::NONE) => {
            Action::View(ViewAction::ToggleHighlightCurrent)
        }
        (KeyCode::Char('o'), KeyModifiers::NONE) => {
            Action::View(ViewAction::ToggleShowHighlightedOnly)
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => Action::View(ViewAction::ResetFilters),
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::View(ViewAction::SortByLength),
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::View(ViewAction::SortByNatural),

        (KeyCode::Char('/'), KeyModifiers::NONE) | (KeyCode::Tab, _) => Action::FocusSearch,

        _ => Action::None,
    }
}
