mod commands;
mod picker;

pub use commands::{Cli, Commands, TargetArgs, render_stats, resolve_directory, run};
pub use picker::pick_project;
