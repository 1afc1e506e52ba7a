use std::path::PathBuf;

use thiserror::Error;

/// Directory-level failures of the session loader
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Session directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Failed to list session directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Non-fatal conditions reported alongside a successful load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    #[error("No user prompts found in {0}")]
    EmptyDirectory(PathBuf),
}

/// Failures turning command-line input into a session directory
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("No projects found in {0}")]
    NoProjects(PathBuf),

    #[error(
        "No project matching '{name}' found. Available projects:\n{}",
        format_names(.available)
    )]
    ProjectNotFound { name: String, available: Vec<String> },

    #[error("Ambiguous project name '{name}'. Matches:\n{}", format_names(.matches))]
    Ambiguous { name: String, matches: Vec<String> },

    #[error(
        "No session directory given. Pass a DIRECTORY or --project NAME. Available projects:\n{}",
        format_names(.available)
    )]
    NoTarget { available: Vec<String> },

    #[error("No project selected")]
    NoSelection,
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        return "  (none)".to_string();
    }
    names.iter().map(|name| format!("  {}", name)).collect::<Vec<_>>().join("\n")
}
