use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

use super::{KeyValueStore, ensure_within_quota};

/// Key-value entries kept as a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    quota: Option<usize>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf, quota: Option<usize>) -> Self {
        Self { path, quota }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_entries(&self) -> AppResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries = serde_json::from_str(&raw)?;
        Ok(entries)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(entries)?;
        let staging = self.staging_path();
        fs::write(&staging, payload)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&staging)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&staging, perms)?;
        }

        // Rename is atomic, so readers see either the old or the new file.
        fs::rename(&staging, &self.path)?;

        tracing::trace!(path = %self.path.display(), "storage file written");
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.read_entries()?;
        ensure_within_quota(&entries, self.quota, key, value)?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }

        Ok(())
    }
}
