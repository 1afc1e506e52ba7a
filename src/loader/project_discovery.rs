use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::error::ResolveError;
use crate::models::ProjectInfo;

/// Maximum number of projects to process (security: prevent resource exhaustion)
const MAX_PROJECTS: usize = 1000;

/// Bookkeeping directory that sits next to the project directories
const MEMORY_DIR_NAME: &str = "memory";

/// Discover all project directories in `<claude_dir>/projects/`
///
/// Each project directory holds the session logs of one working directory, named by
/// mangling that path (every non-alphanumeric character becomes `-`). The display
/// name drops the mangled home-directory prefix so `~/code/api` shows up as `code-api`.
///
/// # Returns
///
/// Projects sorted by directory name. Returns an empty Vec if the projects directory
/// doesn't exist (not an error).
///
/// # Errors
///
/// Returns an error if:
/// - The projects directory exists but cannot be read
/// - More than [`MAX_PROJECTS`] (1000) projects are found (security: resource exhaustion)
pub fn discover_projects(claude_dir: &Path) -> Result<Vec<ProjectInfo>> {
    let home = dirs::home_dir();
    discover_projects_internal(claude_dir, home.as_deref())
}

/// Internal helper with optional home override (for testing)
pub(crate) fn discover_projects_internal(
    claude_dir: &Path,
    home: Option<&Path>,
) -> Result<Vec<ProjectInfo>> {
    let projects_dir = claude_dir.join("projects");

    if !projects_dir.exists() {
        return Ok(Vec::new());
    }

    let home_prefix = home.map(mangled_home_prefix);
    let mut projects = Vec::new();

    let entries = fs::read_dir(&projects_dir)
        .with_context(|| format!("Failed to read projects directory: {}", projects_dir.display()))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable projects entry");
                continue;
            }
        };
        let path = entry.path();

        // Security: symlinked project directories are skipped
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }

        let encoded_name = entry.file_name().to_string_lossy().to_string();
        if encoded_name == MEMORY_DIR_NAME {
            continue;
        }

        if projects.len() >= MAX_PROJECTS {
            bail!(
                "Resource limit exceeded: Found more than {} projects. This may indicate a misconfiguration.",
                MAX_PROJECTS
            );
        }

        let display_name = match &home_prefix {
            Some(prefix) => {
                encoded_name.strip_prefix(prefix.as_str()).unwrap_or(encoded_name.as_str())
            }
            None => encoded_name.as_str(),
        }
        .to_string();

        projects.push(ProjectInfo { encoded_name, display_name, project_dir: path });
    }

    projects.sort_by(|a, b| a.encoded_name.cmp(&b.encoded_name));
    Ok(projects)
}

/// `/home/alice` -> `-home-alice-`
fn mangled_home_prefix(home: &Path) -> String {
    let mangled: String = home
        .to_string_lossy()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}-", mangled.trim_end_matches('-'))
}

/// Resolve a user-supplied project name against discovered projects
///
/// A case-insensitive exact match on the display name wins; otherwise the name must be
/// a case-insensitive substring of exactly one display name.
pub fn find_project_by_name<'a>(
    name: &str,
    projects: &'a [ProjectInfo],
) -> Result<&'a ProjectInfo, ResolveError> {
    let needle = name.to_lowercase();

    if let Some(exact) = projects.iter().find(|p| p.display_name.to_lowercase() == needle) {
        return Ok(exact);
    }

    let matches: Vec<&ProjectInfo> =
        projects.iter().filter(|p| p.display_name.to_lowercase().contains(&needle)).collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(ResolveError::ProjectNotFound {
            name: name.to_string(),
            available: projects.iter().map(|p| p.display_name.clone()).collect(),
        }),
        many => Err(ResolveError::Ambiguous {
            name: name.to_string(),
            matches: many.iter().map(|p| p.display_name.clone()).collect(),
        }),
    }
}
