use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::error::{LoadError, ResolveError};
use crate::highlights::HighlightStore;
use crate::loader::{LoadStats, SessionLoad, discover_projects, find_project_by_name, load_sessions};
use super::picker::pick_project;
use crate::tui::run_interactive;
use crate::utils::{format_path_with_tilde, get_claude_dir, get_data_dir};
use crate::view::PromptView;

#[derive(Parser, Debug)]
#[command(name = "prompt-history")]
#[command(version)]
#[command(
    about = "Browse, search and highlight the prompts you sent in Claude Code sessions",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Where highlights are stored (default: platform data directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which session directory to open
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Directory of session logs (*.jsonl)
    #[arg(value_name = "DIRECTORY", conflicts_with = "project")]
    pub directory: Option<PathBuf>,

    /// Project under ~/.claude/projects, matched by name
    #[arg(short, long, value_name = "NAME")]
    pub project: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show statistics about a session directory
    Stats(TargetArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();

    match &cli.command {
        Some(Commands::Stats(target)) => show_stats(target, data_dir),
        None => browse(&cli.target, data_dir),
    }
}

/// Turn command-line arguments into a session directory
///
/// An explicit DIRECTORY must exist and be a directory. `--project` is matched against
/// the projects under `claude_dir`. With neither, the available projects are listed in
/// the error. `run` offers a numbered menu instead when stdin is a terminal.
pub fn resolve_directory(target: &TargetArgs, claude_dir: &Path) -> Result<PathBuf> {
    if let Some(directory) = &target.directory {
        return check_directory(directory);
    }

    let projects = discover_projects(claude_dir)?;

    match &target.project {
        Some(name) => {
            if projects.is_empty() {
                return Err(ResolveError::NoProjects(claude_dir.join("projects")).into());
            }
            let project = find_project_by_name(name, &projects)?;
            Ok(project.project_dir.clone())
        }
        None => Err(ResolveError::NoTarget {
            available: projects.into_iter().map(|p| p.display_name).collect(),
        }
        .into()),
    }
}

fn check_directory(directory: &Path) -> Result<PathBuf> {
    if !directory.exists() {
        return Err(LoadError::DirectoryNotFound(directory.to_path_buf()).into());
    }
    if !directory.is_dir() {
        return Err(ResolveError::NotADirectory(directory.to_path_buf()).into());
    }
    Ok(directory.to_path_buf())
}

fn resolve_target(target: &TargetArgs) -> Result<PathBuf> {
    // HOME is only needed for project lookups
    if let Some(directory) = &target.directory {
        return check_directory(directory);
    }
    let claude_dir = get_claude_dir()?;

    if target.project.is_none() && io::stdin().is_terminal() {
        let projects = discover_projects(&claude_dir)?;
        if !projects.is_empty() {
            let project = pick_project(&projects, io::stdin().lock(), io::stdout())?;
            return Ok(project.project_dir.clone());
        }
    }

    resolve_directory(target, &claude_dir)
}

fn load_and_report(target: &TargetArgs) -> Result<SessionLoad> {
    let directory = resolve_target(target)?;
    let load = load_sessions(&directory)?;

    let stats = &load.stats;
    eprintln!(
        "Loaded {} prompts from {} session files (skipped {} malformed lines, {} unreadable files)",
        load.prompts.len(),
        stats.session_files,
        stats.malformed_lines,
        stats.unreadable_files
    );
    if let Some(warning) = load.warning() {
        eprintln!("Warning: {}", warning);
    }

    Ok(load)
}

/// Attach the highlight store; without a usable data directory highlights stay in memory
fn open_view(load: SessionLoad, data_dir: Option<&Path>) -> PromptView {
    let root = match data_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => get_data_dir(),
    };
    let store = root.and_then(|root| HighlightStore::for_directory(&root, &load.directory));

    match store {
        Ok(store) => PromptView::with_store(load.prompts, store),
        Err(e) => {
            warn!(error = %format!("{:#}", e), "Highlights will not be saved");
            PromptView::new(load.prompts)
        }
    }
}

fn browse(target: &TargetArgs, data_dir: Option<&Path>) -> Result<()> {
    let load = load_and_report(target)?;
    let view = open_view(load, data_dir);
    run_interactive(view)?;
    Ok(())
}

fn show_stats(target: &TargetArgs, data_dir: Option<&Path>) -> Result<()> {
    let load = load_and_report(target)?;
    let directory = load.directory.clone();
    let stats = load.stats;
    let view = open_view(load, data_dir);

    print!("{}", render_stats(&view, &stats, &directory));
    Ok(())
}

/// Plain-text statistics report for the `stats` command
pub fn render_stats(view: &PromptView, stats: &LoadStats, directory: &Path) -> String {
    let prompts = view.prompts();
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line("Prompt History Statistics".to_string());
    line("=========================".to_string());
    line(format!("Directory: {}", format_path_with_tilde(directory)));
    line(format!(
        "Session files: {} ({} unreadable)",
        stats.session_files, stats.unreadable_files
    ));
    line(format!("Prompts: {}", prompts.len()));
    line(format!("  Highlighted: {}", view.highlighted_count()));
    line(format!(
        "Lines: {} total, {} malformed, {} not user prompts",
        stats.total_lines, stats.malformed_lines, stats.non_prompt_lines
    ));

    // max_by_key keeps the last maximum; reversed, ties go to the earliest prompt
    let longest = prompts.iter().rev().max_by_key(|p| p.length());
    if let Some(longest) = longest {
        line(format!(
            "Longest prompt: {} chars (session {})",
            longest.length(),
            longest.short_session_id()
        ));
    }

    let timestamps = prompts.iter().filter_map(|p| p.timestamp());
    if let Some(first) = timestamps.clone().min() {
        line(format!("First prompt: {}", first.format("%Y-%m-%d %H:%M:%S")));
    }
    if let Some(last) = timestamps.max() {
        line(format!("Last prompt: {}", last.format("%Y-%m-%d %H:%M:%S")));
    }

    out
}
