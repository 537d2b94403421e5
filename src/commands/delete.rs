use std::io::{self, IsTerminal, Write};

use serde_json::json;

use crate::cli::DeleteArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

pub fn run(ctx: &AppContext, args: DeleteArgs) -> AppResult<()> {
    let mut store = ctx.open_store()?;
    let name = args.name;
    if !store.list_profile_names()?.contains(&name) {
        return Err(AppError::ProfileNotFound(name));
    }

    if !args.yes {
        let is_current = store.current_profile_name()?.as_deref() == Some(name.as_str());
        if !confirm(&confirmation_message(&name, is_current), &name)? {
            return ctx
                .output
                .emit("Cancelled.", &json!({ "name": name, "deleted": false }));
        }
    }

    let was_current = store.delete_profile(&name)?;

    let text = format!("Profile \"{name}\" deleted.");
    ctx.output.emit(
        &text,
        &json!({ "name": name, "deleted": true, "was_current": was_current }),
    )
}

fn confirmation_message(name: &str, is_current: bool) -> String {
    let mut message = format!(
        "Delete profile \"{name}\" permanently? All associated data (website settings, etc.) will be lost."
    );
    if is_current {
        message.push_str("\nThis is your currently active profile!");
    }
    message
}

fn confirm(message: &str, name: &str) -> AppResult<bool> {
    if !io::stdin().is_terminal() {
        return Err(AppError::InvalidInput(format!(
            "refusing to delete \"{name}\" without confirmation. pass --yes"
        )));
    }

    let mut stdout = io::stdout();
    write!(stdout, "{message}\n[y/N]: ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_when_deleting_active_profile() {
        let message = confirmation_message("work", true);
        assert!(message.contains("\"work\""));
        assert!(message.ends_with("currently active profile!"));

        assert!(!confirmation_message("work", false).contains("currently active"));
    }

    #[test]
    fn accepts_only_explicit_yes() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
    }
}
