//! Numbered project menu shown when no session directory is given on a terminal

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::error::ResolveError;
use crate::models::ProjectInfo;

/// List `projects` on `output` and read a 1-based choice from `input`
///
/// Bad input (not a number, out of range) re-prompts. End of input aborts with
/// [`ResolveError::NoSelection`].
pub fn pick_project<'a, R, W>(
    projects: &'a [ProjectInfo],
    mut input: R,
    mut output: W,
) -> Result<&'a ProjectInfo>
where
    R: BufRead,
    W: Write,
{
    if projects.is_empty() {
        return Err(ResolveError::NoSelection.into());
    }

    writeln!(output, "Claude Code projects found:\n")?;
    for (i, project) in projects.iter().enumerate() {
        writeln!(output, "  {:2}. {}", i + 1, project.display_name)?;
    }
    writeln!(output)?;

    let mut line = String::new();
    loop {
        write!(output, "Choose a project [1-{}]: ", projects.len())?;
        output.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("Failed to read project choice")?;
        if read == 0 {
            writeln!(output)?;
            return Err(ResolveError::NoSelection.into());
        }

        match parse_choice(&line, projects.len()) {
            Some(index) => return Ok(&projects[index]),
            None => writeln!(output, "Please enter a number between 1 and {}.", projects.len())?,
        }
    }
}

/// 1-based menu entry to a 0-based index
fn parse_choice(raw: &str, count: usize) -> Option<usize> {
    let choice: usize = raw.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;

    fn projects() -> Vec<ProjectInfo> {
        ["code-api", "code-web", "notes"]
            .iter()
            .map(|name| ProjectInfo {
                encoded_name: format!("-home-alice-{}", name),
                display_name: name.to_string(),
                project_dir: PathBuf::from(format!("/tmp/projects/{}", name)),
            })
            .collect()
    }

    fn pick(input: &str) -> (Result<String>, String) {
        let projects = projects();
        let mut output = Vec::new();
        let result = pick_project(&projects, Cursor::new(input), &mut output)
            .map(|p| p.display_name.clone());
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_pick_valid_choice() {
        let (result, output) = pick("2\n");
        assert_eq!(result.unwrap(), "code-web");
        assert!(output.contains("   1. code-api\n   2. code-web\n   3. notes\n"));
        assert!(output.contains("Choose a project [1-3]: "));
        assert!(!output.contains("Please enter"));
    }

    #[test]
    fn test_pick_retries_until_in_range() {
        let (result, output) = pick("0\n4\nabc\n\n  3  \n");
        assert_eq!(result.unwrap(), "notes");
        assert_eq!(output.matches("Please enter a number between 1 and 3.").count(), 4);
        assert_eq!(output.matches("Choose a project [1-3]: ").count(), 5);
    }

    #[test]
    fn test_pick_eof_aborts() {
        let (result, _) = pick("");
        let err = result.unwrap_err();
        assert!(matches!(err.downcast_ref::<ResolveError>(), Some(ResolveError::NoSelection)));
    }

    #[test]
    fn test_pick_eof_after_bad_input() {
        let (result, output) = pick("7\n");
        assert!(result.is_err());
        assert_eq!(output.matches("Please enter").count(), 1);
    }

    #[test]
    fn test_pick_without_projects() {
        let mut output = Vec::new();
        let result = pick_project(&[], Cursor::new("1\n"), &mut output);
        assert!(result.is_err());
        assert!(output.is_empty());
    }

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3\r\n", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
        assert_eq!(parse_choice("4", 3), None);
    }
}
