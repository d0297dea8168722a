#![allow(clippy::unwrap_used)]

use super::*;

fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("expenses")
        .chain(args.iter().copied())
        .map(String::from);
    Cli::try_parse_from(normalize_args(argv)).unwrap()
}

// ── normalize_args ────────────────────────────────────────────

#[test]
fn test_normalize_single_dash_long_flags() {
    let args = normalize_args(
        ["add", "-df", "2024-01-02", "-multiple"]
            .iter()
            .map(|s| s.to_string()),
    );
    assert_eq!(args, vec!["add", "--df", "2024-01-02", "--multiple"]);
}

#[test]
fn test_normalize_keeps_short_flags_and_values() {
    let args = normalize_args(
        ["list", "-d", "-l", "-5", "--limit=3", "-limit=4"]
            .iter()
            .map(|s| s.to_string()),
    );
    assert_eq!(args, vec!["list", "-d", "-l", "-5", "--limit=3", "--limit=4"]);
}

#[test]
fn test_normalize_ignores_unknown_words() {
    let args = normalize_args(["-xyz".to_string()]);
    assert_eq!(args, vec!["-xyz"]);
}

// ── Parsing ───────────────────────────────────────────────────

#[test]
fn test_no_subcommand() {
    let cli = parse(&[]);
    assert!(cli.command.is_none());
    assert_eq!(cli.log_level, "warn");
}

#[test]
fn test_unknown_subcommand_is_captured() {
    let cli = parse(&["frobnicate", "--now"]);
    match cli.command {
        Some(Command::Other(args)) => assert_eq!(args, vec!["frobnicate", "--now"]),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_only_known_subcommands_need_the_ledger() {
    let unknown = parse(&["frobnicate"]).command.unwrap();
    assert!(!unknown.needs_ledger());
    let known: [&[&str]; 4] = [&["add"], &["del", "--id", "1"], &["list"], &["rep"]];
    for args in known {
        assert!(parse(args).command.unwrap().needs_ledger(), "{args:?}");
    }
}

#[test]
fn test_add_flags() {
    match parse(&["add", "-m", "-df", "2024-01-02"]).command {
        Some(Command::Add(args)) => {
            assert!(args.multiple);
            assert!(!args.date);
            assert_eq!(args.date_filled.as_deref(), Some("2024-01-02"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_upd_flags() {
    match parse(&["upd", "--id", "4", "-v", "-n"]).command {
        Some(Command::Upd(args)) => {
            assert_eq!(args.id, 4);
            assert!(args.value);
            assert!(args.name);
            assert!(!args.category);
            assert!(!args.date);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_upd_requires_id() {
    let argv = ["expenses", "upd", "-v"].iter().map(|s| s.to_string());
    assert!(Cli::try_parse_from(normalize_args(argv)).is_err());
}

#[test]
fn test_del_single_dash_id() {
    match parse(&["del", "-id", "9999"]).command {
        Some(Command::Del(args)) => assert_eq!(args.id, 9999),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_list_defaults() {
    match parse(&["list"]).command {
        Some(Command::List(args)) => {
            assert_eq!(args.limit, 100);
            assert!(!args.filter.date);
            assert!(!args.filter.date_range);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_list_aliases_and_negative_limit() {
    match parse(&["list", "-dr", "-cs", "-l", "-1"]).command {
        Some(Command::List(args)) => {
            assert!(args.filter.date_range);
            assert!(args.filter.categories);
            assert_eq!(args.limit, -1);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_rep_csv_and_global_db() {
    let cli = parse(&["rep", "-c", "--csv", "out.csv", "--db", "/tmp/x.db"]);
    assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
    match cli.command {
        Some(Command::Rep(args)) => {
            assert!(args.filter.category);
            assert_eq!(args.csv, Some(PathBuf::from("out.csv")));
        }
        other => panic!("unexpected: {other:?}"),
    }
}
