use std::path::PathBuf;

use clap::Parser;
use profiles::cli::{Cli, Command, ConfigCommand};

#[test]
fn parses_create_with_global_flags() {
    let cli = Cli::try_parse_from(["profiles", "create", "$ABC", "--json", "-vv"])
        .expect("cli parse should work");
    assert!(cli.json);
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Command::Create(args) => {
            assert_eq!(args.name, "$ABC");
            assert!(!args.no_switch);
        }
        _ => panic!("expected create command"),
    }
}

#[test]
fn parses_store_override() {
    let cli = Cli::try_parse_from(["profiles", "--store", "/tmp/s.json", "ls", "--switchable"])
        .expect("cli parse should work");
    assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
    match cli.command {
        Command::Ls(args) => assert!(args.switchable),
        _ => panic!("expected ls command"),
    }
}

#[test]
fn parses_set_with_profile() {
    let cli = Cli::try_parse_from([
        "profiles",
        "set",
        "websiteSettings",
        r#"{"theme":"dark"}"#,
        "--profile",
        "work",
    ])
    .expect("cli parse should work");
    match cli.command {
        Command::Set(args) => {
            assert_eq!(args.key, "websiteSettings");
            assert_eq!(args.value, r#"{"theme":"dark"}"#);
            assert_eq!(args.profile.as_deref(), Some("work"));
        }
        _ => panic!("expected set command"),
    }
}

#[test]
fn parses_delete_yes_short_flag() {
    let cli = Cli::try_parse_from(["profiles", "delete", "old", "-y"]).expect("cli parse");
    match cli.command {
        Command::Delete(args) => {
            assert_eq!(args.name, "old");
            assert!(args.yes);
        }
        _ => panic!("expected delete command"),
    }
}

#[test]
fn show_name_is_optional() {
    let cli = Cli::try_parse_from(["profiles", "show"]).expect("cli parse");
    match cli.command {
        Command::Show(args) => assert!(args.name.is_none()),
        _ => panic!("expected show command"),
    }
}

#[test]
fn quota_flags_conflict() {
    let result = Cli::try_parse_from([
        "profiles",
        "config",
        "set",
        "--quota-bytes",
        "10",
        "--no-quota",
    ]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from(["profiles", "config", "show"]).expect("cli parse");
    match cli.command {
        Command::Config(args) => assert!(matches!(args.command, ConfigCommand::Show)),
        _ => panic!("expected config command"),
    }
}

#[test]
fn create_requires_name() {
    assert!(Cli::try_parse_from(["profiles", "create"]).is_err());
}
