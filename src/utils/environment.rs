use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Overrides the platform data directory for highlight storage
pub const DATA_DIR_ENV: &str = "PROMPT_HISTORY_DATA_DIR";

const APP_DIR_NAME: &str = "prompt-history";

/// Get the Claude directory path (~/.claude)
pub fn get_claude_dir() -> Result<PathBuf> {
    claude_dir_from_home(env::var_os("HOME"))
}

/// Root for persisted state: `$PROMPT_HISTORY_DATA_DIR`, else the platform data dir
pub fn get_data_dir() -> Result<PathBuf> {
    data_dir_from(env::var_os(DATA_DIR_ENV), dirs::data_dir())
}

fn claude_dir_from_home(home: Option<OsString>) -> Result<PathBuf> {
    let home = home.filter(|h| !h.is_empty()).context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".claude"))
}

fn data_dir_from(env_override: Option<OsString>, platform: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = env_override.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let base = platform.context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR_NAME))
}
