use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "profiles", version, about = "Manage named configuration profiles")]
pub struct Cli {
    #[arg(long, global = true, help = "Storage file to use instead of the configured one")]
    pub store: Option<PathBuf>,
    #[arg(long, global = true, help = "Keep config and data under this directory")]
    pub root: Option<PathBuf>,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Ls(LsArgs),
    Current,
    Create(CreateArgs),
    Switch(SwitchArgs),
    Delete(DeleteArgs),
    Show(ShowArgs),
    Set(SetArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct LsArgs {
    #[arg(long, help = "Only list profiles that can be switched to")]
    pub switchable: bool,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(help = "Profile name")]
    pub name: String,
    #[arg(long, help = "Do not make the new profile current")]
    pub no_switch: bool,
}

#[derive(Debug, Args)]
pub struct SwitchArgs {
    #[arg(help = "Profile name")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(help = "Profile name")]
    pub name: String,
    #[arg(short = 'y', long, help = "Skip the confirmation prompt")]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(help = "Profile name (defaults to the current profile)")]
    pub name: Option<String>,
    #[arg(long, help = "Only print this field")]
    pub field: Option<String>,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(help = "Field to replace, e.g. websiteSettings")]
    pub key: String,
    #[arg(help = "New value as JSON")]
    pub value: String,
    #[arg(long, help = "Profile to update (defaults to the current profile)")]
    pub profile: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Show,
    Set(ConfigSetArgs),
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    #[arg(long, help = "Default storage file")]
    pub storage_file: Option<PathBuf>,
    #[arg(long, help = "Storage quota in bytes")]
    pub quota_bytes: Option<usize>,
    #[arg(long, conflicts_with = "quota_bytes", help = "Remove the storage quota")]
    pub no_quota: bool,
}
