use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        store,
        root,
        json,
        verbose,
        command,
    } = cli;

    let mut ctx = AppContext::bootstrap(root, store, json, verbose)?;

    match command {
        Command::Ls(args) => commands::ls::run(&ctx, args),
        Command::Current => commands::ls::current(&ctx),
        Command::Create(args) => commands::create::run(&ctx, args),
        Command::Switch(args) => commands::switch::run(&ctx, args),
        Command::Delete(args) => commands::delete::run(&ctx, args),
        Command::Show(args) => commands::show::run(&ctx, args),
        Command::Set(args) => commands::set::run(&ctx, args),
        Command::Config(args) => commands::config::run(&mut ctx, args.command),
    }
}
