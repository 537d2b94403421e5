pub mod file;
pub mod memory;

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;

/// String-keyed persistence backing the profile store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&mut self, key: &str) -> AppResult<()>;
}

fn usage_after_set(entries: &BTreeMap<String, String>, key: &str, value: &str) -> usize {
    let others: usize = entries
        .iter()
        .filter(|(existing, _)| existing.as_str() != key)
        .map(|(existing, stored)| existing.len() + stored.len())
        .sum();
    others + key.len() + value.len()
}

pub(crate) fn ensure_within_quota(
    entries: &BTreeMap<String, String>,
    quota: Option<usize>,
    key: &str,
    value: &str,
) -> AppResult<()> {
    let Some(limit) = quota else {
        return Ok(());
    };

    let needed = usage_after_set(entries, key, value);
    if needed > limit {
        tracing::warn!(key, needed, limit, "storage quota exceeded");
        return Err(AppError::QuotaExceeded { limit, needed });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaced_values_do_not_count_twice() {
        let mut entries = BTreeMap::new();
        entries.insert("k".to_string(), "0123456789".to_string());

        assert!(ensure_within_quota(&entries, Some(6), "k", "abcde").is_ok());
        assert!(ensure_within_quota(&entries, Some(6), "k", "abcdef").is_err());
    }

    #[test]
    fn no_quota_accepts_anything() {
        let entries = BTreeMap::new();
        assert!(ensure_within_quota(&entries, None, "k", &"x".repeat(10_000)).is_ok());
    }
}
