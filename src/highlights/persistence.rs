//! Highlight persistence: load/save with atomic writes

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::metadata::{HIGHLIGHTS_VERSION, HighlightFile, HighlightMap};
use crate::models::PromptId;

const HIGHLIGHTS_SUBDIR: &str = "highlights";

/// Hex characters of the directory digest used as the file name
const KEY_LEN: usize = 16;

/// Compute the storage key of a canonical directory path
/// Returns first 16 characters of the SHA256 hex digest
fn compute_directory_key(canonical: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string_lossy().as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..KEY_LEN].to_string()
}

/// Highlight state of one source directory
#[derive(Debug, Clone)]
pub struct HighlightStore {
    directory: PathBuf,
    path: PathBuf,
}

impl HighlightStore {
    /// Scope a store under `root` to the session directory `directory`
    ///
    /// Nothing is created on disk until the first save.
    ///
    /// # Errors
    ///
    /// Returns an error if `directory` cannot be canonicalized (missing, or a
    /// component is not accessible).
    pub fn for_directory(root: &Path, directory: &Path) -> Result<Self> {
        // Canonicalize so relative paths and symlinks map to the same file
        let canonical = directory.canonicalize().with_context(|| {
            format!("Failed to canonicalize session directory: {}", directory.display())
        })?;
        let key = compute_directory_key(&canonical);
        let path = root.join(HIGHLIGHTS_SUBDIR).join(format!("{}.json", key));

        Ok(Self { directory: canonical, path })
    }

    /// Canonical source directory this store belongs to
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Location of the highlight file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted highlights, falling back to an empty map
    pub fn load(&self) -> HighlightMap {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return HighlightMap::new(),
            Err(e) => {
                warn!(
                    path = ?self.path,
                    error = %e,
                    "Failed to read highlight file, starting empty"
                );
                return HighlightMap::new();
            }
        };

        let file: HighlightFile = match serde_json::from_str(&json) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Corrupt highlight file, starting empty");
                return HighlightMap::new();
            }
        };

        if file.version != HIGHLIGHTS_VERSION {
            warn!(
                path = ?self.path,
                expected = HIGHLIGHTS_VERSION,
                found = file.version,
                "Highlight file version mismatch, starting empty"
            );
            return HighlightMap::new();
        }

        if file.directory != self.directory {
            warn!(
                path = ?self.path,
                expected = ?self.directory,
                found = ?file.directory,
                "Highlight file belongs to another directory, starting empty"
            );
            return HighlightMap::new();
        }

        debug!(path = ?self.path, count = file.highlights.len(), "Loaded highlights");
        file.highlights
    }

    /// Save the full mapping atomically (temp file + rename)
    pub fn save(&self, highlights: &HighlightMap) -> Result<()> {
        let parent = self.path.parent().context("Highlight file has no parent directory")?;
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create highlight directory: {}", parent.display())
        })?;

        let file = HighlightFile::new(self.directory.clone(), highlights.clone());
        let json = serde_json::to_string_pretty(&file).context("Failed to serialize highlights")?;

        let temp = self.path.with_extension(format!("json.{}.tmp", std::process::id()));
        fs::write(&temp, json).context("Failed to write highlight temp file")?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e).context("Failed to rename highlight temp file");
        }

        Ok(())
    }

    /// Flip one highlight and persist the whole mapping
    ///
    /// Absent becomes `true`; `true` is removed. Returns the new flag. The in-memory
    /// map keeps the new flag even when saving fails.
    pub fn toggle_and_persist(&self, highlights: &mut HighlightMap, id: &PromptId) -> Result<bool> {
        let now_highlighted = toggle(highlights, id);
        self.save(highlights)?;
        Ok(now_highlighted)
    }
}

/// In-memory toggle shared with stores that have no backing file
pub(crate) fn toggle(highlights: &mut HighlightMap, id: &PromptId) -> bool {
    if highlights.get(id).copied().unwrap_or(false) {
        highlights.remove(id);
        false
    } else {
        highlights.insert(id.clone(), true);
        true
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store_fixture() -> (TempDir, TempDir, HighlightStore) {
        let data = TempDir::new().unwrap();
        let sessions = TempDir::new().unwrap();
        let store = HighlightStore::for_directory(data.path(), sessions.path()).unwrap();
        (data, sessions, store)
    }

    #[test]
    fn test_directory_key_is_stable_hex() {
        let key = compute_directory_key(Path::new("/home/dev/sessions"));
        assert_eq!(key.len(), KEY_LEN);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, compute_directory_key(Path::new("/home/dev/sessions")));
        assert_ne!(key, compute_directory_key(Path::new("/home/dev/other")));
    }

    #[test]
    fn test_relative_and_absolute_paths_share_a_file() {
        let data = TempDir::new().unwrap();
        let sessions = TempDir::new().unwrap();
        let nested = sessions.path().join("a");
        fs::create_dir(&nested).unwrap();

        let direct = HighlightStore::for_directory(data.path(), &nested).unwrap();
        let dotted =
            HighlightStore::for_directory(data.path(), &sessions.path().join("a/../a")).unwrap();
        assert_eq!(direct.path(), dotted.path());
    }

    #[test]
    fn test_for_directory_missing_source() {
        let data = TempDir::new().unwrap();
        let result = HighlightStore::for_directory(data.path(), Path::new("/nonexistent/dir/x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_data, _sessions, store) = store_fixture();
        assert!(!store.path().exists());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_data, _sessions, store) = store_fixture();
        let mut map = HighlightMap::new();
        map.insert(PromptId::new("a1b2c3", 0), true);
        map.insert(PromptId::new("session:with:colons", 12), true);

        store.save(&map).unwrap();
        assert_eq!(store.load(), map);

        // Saving what was loaded changes nothing
        let first = fs::read_to_string(store.path()).unwrap();
        store.save(&store.load()).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), first);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let (_data, _sessions, store) = store_fixture();
        store.save(&HighlightMap::new()).unwrap();

        let entries: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let (_data, _sessions, store) = store_fixture();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_version_mismatch_loads_empty() {
        let (_data, _sessions, store) = store_fixture();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let json = serde_json::json!({
            "version": 99,
            "directory": store.directory(),
            "highlights": { "abc:0": true }
        });
        fs::write(store.path(), json.to_string()).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_directory_mismatch_loads_empty() {
        let (_data, _sessions, store) = store_fixture();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        let json = serde_json::json!({
            "version": HIGHLIGHTS_VERSION,
            "directory": "/somewhere/else",
            "highlights": { "abc:0": true }
        });
        fs::write(store.path(), json.to_string()).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let (_data, _sessions, store) = store_fixture();
        let id = PromptId::new("abc", 4);
        let mut map = HighlightMap::new();

        assert!(store.toggle_and_persist(&mut map, &id).unwrap());
        assert_eq!(store.load().get(&id), Some(&true));

        assert!(!store.toggle_and_persist(&mut map, &id).unwrap());
        assert!(map.is_empty());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_toggle_treats_false_as_absent() {
        let mut map = HighlightMap::new();
        let id = PromptId::new("abc", 0);
        map.insert(id.clone(), false);

        assert!(toggle(&mut map, &id));
        assert_eq!(map.get(&id), Some(&true));
    }

    #[test]
    fn test_save_failure_keeps_in_memory_flag() {
        let (data, _sessions, store) = store_fixture();
        // A plain file where the highlights directory should be
        fs::write(data.path().join(HIGHLIGHTS_SUBDIR), "").unwrap();

        let id = PromptId::new("abc", 1);
        let mut map = HighlightMap::new();
        let err = store.toggle_and_persist(&mut map, &id).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to create highlight directory"));
        assert_eq!(map.get(&id), Some(&true));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let (_data, _sessions, store) = store_fixture();
        // Renaming a file over a directory fails regardless of permissions
        fs::create_dir_all(store.path()).unwrap();

        let mut map = HighlightMap::new();
        map.insert(PromptId::new("abc", 0), true);
        assert!(store.save(&map).is_err());

        let parent = store.path().parent().unwrap();
        let leftovers: Vec<_> = fs::read_dir(parent)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
        assert!(store.path().is_dir());
    }
}
