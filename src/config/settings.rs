use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub storage_file: Option<PathBuf>,
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

impl Settings {
    pub fn quota_bytes(&self) -> AppResult<Option<usize>> {
        match self.quota_bytes {
            Some(0) => Err(AppError::Config(
                "quota_bytes must be greater than 0".to_string(),
            )),
            quota => Ok(quota),
        }
    }
}

pub fn load(path: &Path) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw).map_err(|err| {
        AppError::Config(format!("invalid settings in {}: {err}", path.display()))
    })?;
    Ok(settings)
}

pub fn save(path: &Path, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(path, payload)?;
    Ok(())
}
