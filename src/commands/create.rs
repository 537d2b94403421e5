use serde_json::json;

use crate::cli::CreateArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub fn run(ctx: &AppContext, args: CreateArgs) -> AppResult<()> {
    let mut store = ctx.open_store()?;
    let name = store.create_profile(&args.name)?;

    let activate = !args.no_switch;
    if activate {
        store
            .switch_profile(&name)
            .map_err(|err| AppError::NotActivated {
                name: name.clone(),
                source: Box::new(err),
            })?;
    }

    let text = if activate {
        format!("Profile \"{name}\" created and activated.")
    } else {
        format!("Profile \"{name}\" created.")
    };
    ctx.output
        .emit(&text, &json!({ "name": name, "current": activate }))
}
