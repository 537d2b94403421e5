use std::path::PathBuf;

use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;
use crate::profile::{ProfileEvent, ProfileStore};
use crate::storage::FileKeyValueStore;

#[derive(Debug)]
pub struct AppContext {
    pub verbose: u8,
    pub paths: AppPaths,
    pub settings: Settings,
    pub storage_file: PathBuf,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(
        root: Option<PathBuf>,
        store_file: Option<PathBuf>,
        json: bool,
        verbose: u8,
    ) -> AppResult<Self> {
        let paths = match root {
            Some(root) => AppPaths::rooted_at(root),
            None => AppPaths::discover()?,
        };
        let settings = config::load_settings(&paths)?;
        let storage_file = config::resolve_storage_file(&paths, &settings, store_file);
        let output = Output::new(json);

        Ok(Self {
            verbose,
            paths,
            settings,
            storage_file,
            output,
        })
    }

    /// Opened per command so `config` keeps working when storage is unusable.
    pub fn open_store(&self) -> AppResult<ProfileStore<FileKeyValueStore>> {
        let quota = self.settings.quota_bytes()?;
        let storage = FileKeyValueStore::new(self.storage_file.clone(), quota);
        let mut store = ProfileStore::open(storage)?;

        let output = self.output;
        store.subscribe(move |event| announce(output, event));
        Ok(store)
    }
}

/// Stands in for reloading the page: tell the user which profile is now in
/// effect.
fn announce(output: Output, event: &ProfileEvent) {
    if let ProfileEvent::CurrentChanged { current, .. } = event {
        match current {
            Some(name) => output.notice(&format!("Active profile is now \"{name}\".")),
            None => output.notice("No profile is active."),
        }
    }
}
