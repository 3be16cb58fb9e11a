//! Tests for flag parsing.

use super::parse;
use crate::cli::{long_single_dash_flags, Cli, PreviewArg};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_defaults() {
    let cli = parse(&["csv2pass", "--file", "export.csv"]);
    assert_eq!(cli.file.as_deref(), Some(Path::new("export.csv")));
    assert!(cli.store_path.is_none());
    assert!(!cli.dryrun);
    assert_eq!(cli.preview, PreviewArg::Text);
    assert!(!cli.strip_punctuation);
    assert!(cli.completions.is_none());
    assert!(!cli.man);
}

#[test]
fn cli_parse_short_file() {
    let cli = parse(&["csv2pass", "-f", "e.csv"]);
    assert_eq!(cli.file.as_deref(), Some(Path::new("e.csv")));
}

#[test]
fn cli_parse_file_is_optional_at_parse_time() {
    let cli = parse(&["csv2pass"]);
    assert!(cli.file.is_none());
}

#[test]
fn cli_parse_store_path_and_alias() {
    let cli = parse(&["csv2pass", "--file", "e.csv", "--store-path", "/srv/pass"]);
    assert_eq!(cli.store_path.as_deref(), Some("/srv/pass"));

    let cli = parse(&["csv2pass", "--file", "e.csv", "--storePath", "/srv/pass"]);
    assert_eq!(cli.store_path.as_deref(), Some("/srv/pass"));
}

#[test]
fn cli_parse_dryrun_and_alias() {
    assert!(parse(&["csv2pass", "--file", "e.csv", "--dryrun"]).dryrun);
    assert!(parse(&["csv2pass", "--file", "e.csv", "--dry-run"]).dryrun);
}

#[test]
fn cli_parse_preview_json() {
    let cli = parse(&["csv2pass", "--file", "e.csv", "--dryrun", "--preview", "json"]);
    assert_eq!(cli.preview, PreviewArg::Json);
}

#[test]
fn cli_parse_rejects_unknown_preview() {
    assert!(Cli::try_parse_from(["csv2pass", "--preview", "yaml"]).is_err());
}

#[test]
fn cli_parse_completions() {
    let cli = parse(&["csv2pass", "--completions", "bash"]);
    assert_eq!(cli.completions, Some(clap_complete::Shell::Bash));
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

fn parse_single_dash(args: &[&str]) -> Cli {
    Cli::try_parse_from(long_single_dash_flags(args.iter().copied())).unwrap()
}

#[test]
fn cli_parse_single_dash_long_flags() {
    let cli = parse_single_dash(&[
        "csv2pass",
        "-file",
        "x.csv",
        "-storePath",
        "/srv/pass",
        "-dryrun",
    ]);
    assert_eq!(cli.file.as_deref(), Some(Path::new("x.csv")));
    assert_eq!(cli.store_path.as_deref(), Some("/srv/pass"));
    assert!(cli.dryrun);
}

#[test]
fn cli_parse_single_dash_with_equals() {
    let cli = parse_single_dash(&["csv2pass", "-file=x.csv", "-storePath=/srv/pass"]);
    assert_eq!(cli.file.as_deref(), Some(Path::new("x.csv")));
    assert_eq!(cli.store_path.as_deref(), Some("/srv/pass"));
}

#[test]
fn single_dash_rewrite_leaves_other_args_alone() {
    let args = long_single_dash_flags(["csv2pass", "--file", "a.csv", "--", "-dryrun"]);
    assert_eq!(args, ["csv2pass", "--file", "a.csv", "--", "-dryrun"]);

    let args = long_single_dash_flags(["csv2pass", "-f", "e.csv", "-man", "-dryrun"]);
    assert_eq!(args, ["csv2pass", "-f", "e.csv", "-man", "--dryrun"]);
}
