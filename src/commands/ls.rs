use serde::Serialize;
use serde_json::json;

use crate::cli::LsArgs;
use crate::context::AppContext;
use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileEntry {
    pub name: String,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileListing {
    pub current: Option<String>,
    pub profiles: Vec<ProfileEntry>,
    #[serde(skip)]
    total: usize,
}

/// Builds the listing shown by both the full list and the switch menu.
pub fn listing(names: Vec<String>, current: Option<String>, switchable_only: bool) -> ProfileListing {
    let total = names.len();
    let profiles = names
        .into_iter()
        .map(|name| {
            let is_current = current.as_deref() == Some(name.as_str());
            ProfileEntry {
                name,
                current: is_current,
            }
        })
        .filter(|entry| !(switchable_only && entry.current))
        .collect();

    ProfileListing {
        current,
        profiles,
        total,
    }
}

fn render_text(listing: &ProfileListing) -> Vec<String> {
    if listing.total == 0 {
        return vec!["0 profiles".to_string()];
    }
    if listing.profiles.is_empty() {
        return vec!["(no other profiles)".to_string()];
    }

    listing
        .profiles
        .iter()
        .map(|entry| {
            let marker = if entry.current { "*" } else { " " };
            format!("{marker} {}", entry.name)
        })
        .collect()
}

pub fn run(ctx: &AppContext, args: LsArgs) -> AppResult<()> {
    let store = ctx.open_store()?;
    let names = store.list_profile_names()?;
    let current = store.current_profile_name()?;
    let listing = listing(names, current, args.switchable);

    let text = render_text(&listing).join("\n");
    ctx.output.emit(&text, &listing)
}

pub fn current(ctx: &AppContext) -> AppResult<()> {
    let store = ctx.open_store()?;
    let current = store.current_profile_name()?;
    let text = current.clone().unwrap_or_else(|| "No Profile".to_string());
    ctx.output.emit(&text, &json!({ "current": current }))
}
