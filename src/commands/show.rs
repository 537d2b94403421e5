use crate::cli::ShowArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub fn run(ctx: &AppContext, args: ShowArgs) -> AppResult<()> {
    let store = ctx.open_store()?;
    let record = store
        .profile_data(args.name.as_deref())?
        .ok_or_else(|| match args.name.as_ref() {
            Some(name) => AppError::ProfileNotFound(name.clone()),
            None => AppError::NoActiveProfile,
        })?;

    let value = match args.field.as_deref() {
        Some(key) => record.field(key).ok_or_else(|| {
            AppError::InvalidInput(format!("profile has no field `{key}`"))
        })?,
        None => serde_json::to_value(&record)?,
    };

    let text = serde_json::to_string_pretty(&value)?;
    ctx.output.emit(&text, &value)
}
