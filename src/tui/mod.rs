//! Interactive prompt browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::App;
pub use events::{Action, Focus, key_to_action};
pub use rendering::{list_row, summary_text};
use terminal::TerminalManager;

use crate::view::PromptView;

/// Run the interactive TUI until the user quits
pub fn run_interactive(view: PromptView) -> Result<PromptView> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(view);

    let res = app.run(manager.terminal_mut());
    manager.restore()?;

    res.map(|()| app.into_view())
}
