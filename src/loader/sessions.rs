//! Session loader: turns a directory of `.jsonl` session logs into an ordered prompt list.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Directory-level errors**: A missing directory, or one that cannot be listed, fails
//!   the whole load with a [`LoadError`]
//! - **File-level errors**: Files that cannot be opened or read are skipped and counted in
//!   [`LoadStats::unreadable_files`]; prompts partially read from them are discarded
//! - **Line-level errors**: Malformed lines are skipped and counted; they never abort a file
//! - **Empty result**: Zero prompts is reported as a [`LoadWarning`], not an error
//!
//! Counts are returned to the caller instead of printed, so the interface decides what
//! to show.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{LoadError, LoadWarning};
use crate::models::{Prompt, PromptId};
use crate::parsers::{ParseOutcome, SkipReason, parse_record_line};

const SESSION_FILE_EXTENSION: &str = "jsonl";

/// Diagnostic counters collected during a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Session files whose contents were loaded
    pub session_files: usize,
    /// Session files (or directory entries) that could not be read
    pub unreadable_files: usize,
    /// Non-blank lines seen in readable files
    pub total_lines: usize,
    /// Lines that were not valid records
    pub malformed_lines: usize,
    /// Valid records that are not user prompts, or have no text
    pub non_prompt_lines: usize,
}

/// Result of loading one session directory
#[derive(Debug, Clone)]
pub struct SessionLoad {
    pub directory: PathBuf,
    pub prompts: Vec<Prompt>,
    pub stats: LoadStats,
}

impl SessionLoad {
    /// Non-fatal condition worth telling the user about
    pub fn warning(&self) -> Option<LoadWarning> {
        if self.prompts.is_empty() {
            Some(LoadWarning::EmptyDirectory(self.directory.clone()))
        } else {
            None
        }
    }
}

/// Prompts and counters from a single file, merged only if the whole file was readable
#[derive(Default)]
struct FileScan {
    prompts: Vec<Prompt>,
    total_lines: usize,
    malformed_lines: usize,
    non_prompt_lines: usize,
}

/// Load every session log in `directory` (one level deep, `*.jsonl`, by file name).
///
/// Prompts come back in natural order: file order, then position within the file.
///
/// # Errors
///
/// Returns [`LoadError::DirectoryNotFound`] if the path does not exist or is not a
/// directory, and [`LoadError::Io`] if the directory itself cannot be listed.
pub fn load_sessions(directory: &Path) -> Result<SessionLoad, LoadError> {
    if !directory.is_dir() {
        return Err(LoadError::DirectoryNotFound(directory.to_path_buf()));
    }

    let mut stats = LoadStats::default();
    let files = list_session_files(directory, &mut stats)?;
    let mut prompts = Vec::new();

    for (session_order, path) in files.iter().enumerate() {
        let session_id = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => continue,
        };

        let scan = scan_session_file(path, &session_id, session_order);
        absorb_scan(path, scan, &mut stats, &mut prompts);
    }

    debug!(
        directory = ?directory,
        prompts = prompts.len(),
        files = stats.session_files,
        malformed = stats.malformed_lines,
        "Loaded session directory"
    );

    Ok(SessionLoad { directory: directory.to_path_buf(), prompts, stats })
}

/// Session files directly inside `directory`, sorted by file name
fn list_session_files(directory: &Path, stats: &mut LoadStats) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"));
                return Err(LoadError::Io { path: directory.to_path_buf(), source });
            }
            Err(err) => {
                warn!(error = %err, "Skipping unreadable directory entry");
                stats.unreadable_files += 1;
                continue;
            }
        };

        // Symlinks are not followed, so they report a non-file type here
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == SESSION_FILE_EXTENSION) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Merge one file's result; a failed file contributes nothing but its count
fn absorb_scan(
    path: &Path,
    scan: io::Result<FileScan>,
    stats: &mut LoadStats,
    prompts: &mut Vec<Prompt>,
) {
    match scan {
        Ok(scan) => {
            stats.session_files += 1;
            stats.total_lines += scan.total_lines;
            stats.malformed_lines += scan.malformed_lines;
            stats.non_prompt_lines += scan.non_prompt_lines;
            prompts.extend(scan.prompts);
        }
        Err(e) => {
            stats.unreadable_files += 1;
            warn!(path = ?path, error = %e, "Skipping unreadable session file");
        }
    }
}

fn scan_session_file(path: &Path, session_id: &str, session_order: usize) -> io::Result<FileScan> {
    let reader = BufReader::new(File::open(path)?);
    scan_session_lines(reader, path, session_id, session_order)
}

fn scan_session_lines<R: BufRead>(
    reader: R,
    path: &Path,
    session_id: &str,
    session_order: usize,
) -> io::Result<FileScan> {
    let mut scan = FileScan::default();
    let mut sequence_index = 0;

    for (line_num, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let outcome = match std::str::from_utf8(&line) {
            Ok(text) => parse_record_line(text),
            Err(_) => ParseOutcome::Skip(SkipReason::Malformed),
        };

        match outcome {
            ParseOutcome::Prompt(candidate) => {
                scan.total_lines += 1;
                let id = PromptId::new(session_id, sequence_index);
                sequence_index += 1;
                scan.prompts.push(Prompt::new(
                    id,
                    session_order,
                    candidate.text,
                    candidate.timestamp,
                    candidate.cwd,
                ));
            }
            ParseOutcome::Skip(SkipReason::Blank) => {}
            ParseOutcome::Skip(SkipReason::Malformed) => {
                scan.total_lines += 1;
                scan.malformed_lines += 1;
                debug!(path = ?path, line = line_num + 1, "Skipping malformed line");
            }
            ParseOutcome::Skip(SkipReason::NotUserAuthored | SkipReason::NoText) => {
                scan.total_lines += 1;
                scan.non_prompt_lines += 1;
            }
        }
    }

    Ok(scan)
}
