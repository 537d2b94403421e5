use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{ConfigCommand, ConfigSetArgs};
use crate::config;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
struct ConfigView {
    config_dir: PathBuf,
    data_dir: PathBuf,
    settings_file: PathBuf,
    storage_file: PathBuf,
    quota_bytes: Option<usize>,
}

pub fn run(ctx: &mut AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            let view = ConfigView {
                config_dir: ctx.paths.config_dir().to_path_buf(),
                data_dir: ctx.paths.data_dir().to_path_buf(),
                settings_file: ctx.paths.settings_file(),
                storage_file: ctx.storage_file.clone(),
                quota_bytes: ctx.settings.quota_bytes,
            };

            let quota = view
                .quota_bytes
                .map(|bytes| format!("{bytes} bytes"))
                .unwrap_or_else(|| "none".to_string());
            let text = format!(
                "settings: {}\nstorage: {}\nquota: {quota}",
                view.settings_file.display(),
                view.storage_file.display(),
            );
            ctx.output.emit(&text, &view)
        }
        ConfigCommand::Set(args) => set(ctx, args),
    }
}

fn set(ctx: &mut AppContext, args: ConfigSetArgs) -> AppResult<()> {
    if args.storage_file.is_none() && args.quota_bytes.is_none() && !args.no_quota {
        return Err(AppError::InvalidInput(
            "nothing to change. pass --storage-file, --quota-bytes or --no-quota".to_string(),
        ));
    }

    let mut updated = ctx.settings.clone();
    if let Some(path) = args.storage_file {
        updated.storage_file = Some(path);
    }
    if let Some(quota) = args.quota_bytes {
        updated.quota_bytes = Some(quota);
    }
    if args.no_quota {
        updated.quota_bytes = None;
    }
    updated.quota_bytes()?;

    config::save_settings(&ctx.paths, &updated)?;
    ctx.settings = updated;

    let text = format!("Updated settings at {}.", ctx.paths.settings_file().display());
    ctx.output.emit(&text, &ctx.settings)
}
