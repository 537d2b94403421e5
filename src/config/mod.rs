pub mod paths;
pub mod settings;

use std::path::PathBuf;

pub use paths::AppPaths;
pub use settings::Settings;

use crate::error::AppResult;

pub fn load_settings(paths: &AppPaths) -> AppResult<Settings> {
    settings::load(&paths.settings_file())
}

pub fn save_settings(paths: &AppPaths, settings: &Settings) -> AppResult<()> {
    settings::save(&paths.settings_file(), settings)
}

/// Command line override first, then settings, then the data directory default.
pub fn resolve_storage_file(
    paths: &AppPaths,
    settings: &Settings,
    requested: Option<PathBuf>,
) -> PathBuf {
    requested
        .or_else(|| settings.storage_file.clone())
        .unwrap_or_else(|| paths.default_storage_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_file_precedence() {
        let paths = AppPaths::rooted_at("/tmp/root");
        let mut settings = Settings::default();

        assert_eq!(
            resolve_storage_file(&paths, &settings, None),
            paths.default_storage_file()
        );

        settings.storage_file = Some(PathBuf::from("/tmp/from-settings.json"));
        assert_eq!(
            resolve_storage_file(&paths, &settings, None),
            PathBuf::from("/tmp/from-settings.json")
        );

        assert_eq!(
            resolve_storage_file(&paths, &settings, Some(PathBuf::from("/tmp/cli.json"))),
            PathBuf::from("/tmp/cli.json")
        );
    }
}
