pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{get_claude_dir, get_data_dir};
pub use paths::format_path_with_tilde;
pub use terminal::strip_ansi_codes;
