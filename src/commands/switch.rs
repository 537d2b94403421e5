use serde_json::json;

use crate::cli::SwitchArgs;
use crate::context::AppContext;
use crate::error::AppResult;

pub fn run(ctx: &AppContext, args: SwitchArgs) -> AppResult<()> {
    let mut store = ctx.open_store()?;
    let previous = store.current_profile_name()?;
    if previous.as_deref() == Some(args.name.as_str()) {
        let text = format!("Already using profile \"{}\".", args.name);
        return ctx
            .output
            .emit(&text, &json!({ "current": args.name, "changed": false }));
    }

    store.switch_profile(&args.name)?;

    ctx.output
        .emit(&args.name, &json!({ "current": args.name, "changed": true }))
}
