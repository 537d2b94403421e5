use serde_json::{Value, json};

use crate::cli::SetArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub fn run(ctx: &AppContext, args: SetArgs) -> AppResult<()> {
    let value = parse_value(&args.value)?;
    let mut store = ctx.open_store()?;

    let target = match args.profile {
        Some(name) => {
            store.save_profile_field(&name, &args.key, value)?;
            name
        }
        None => {
            store.save_current_profile_field(&args.key, value)?;
            store
                .current_profile_name()?
                .ok_or(AppError::NoActiveProfile)?
        }
    };

    let text = format!("Saved `{}` for profile \"{target}\".", args.key);
    ctx.output
        .emit(&text, &json!({ "profile": target, "key": args.key }))
}

fn parse_value(raw: &str) -> AppResult<Value> {
    serde_json::from_str(raw).map_err(|err| {
        AppError::InvalidInput(format!(
            "value must be JSON ({err}). quote plain strings, e.g. '\"dark\"'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_values() {
        assert_eq!(
            parse_value(r#"{"theme":"dark"}"#).expect("object"),
            json!({ "theme": "dark" })
        );
        assert_eq!(parse_value("[]").expect("array"), json!([]));
        assert_eq!(parse_value("\"dark\"").expect("string"), json!("dark"));
    }

    #[test]
    fn bare_words_are_rejected() {
        let err = parse_value("dark").expect_err("not json");
        assert!(matches!(err, AppError::InvalidInput(message) if message.contains("quote")));
    }
}
