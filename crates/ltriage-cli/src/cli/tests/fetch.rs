use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["ltriage", "fetch", "users.txt"]) {
        CliCommand::Fetch {
            entities,
            work_dir,
            run_log,
            attempts,
        } => {
            assert_eq!(entities, PathBuf::from("users.txt"));
            assert!(work_dir.is_none());
            assert!(run_log.is_none());
            assert!(attempts.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_all_flags() {
    match parse(&[
        "ltriage",
        "fetch",
        "users.txt",
        "--work-dir",
        "/srv/scrape",
        "--run-log",
        "/srv/scrape/log.txt",
        "--attempts",
        "3",
    ]) {
        CliCommand::Fetch {
            work_dir,
            run_log,
            attempts,
            ..
        } => {
            assert_eq!(work_dir, Some(PathBuf::from("/srv/scrape")));
            assert_eq!(run_log, Some(PathBuf::from("/srv/scrape/log.txt")));
            assert_eq!(attempts, Some(3));
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_requires_entities() {
    assert!(Cli::try_parse_from(["ltriage", "fetch"]).is_err());
}
