//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without executing the commands.

#[allow(dead_code)]
#[path = "../src/cli.rs"]
mod cli;

use clap::Parser;
use cli::{Args, Command};
use std::path::PathBuf;

#[test]
fn test_resolve_defaults() {
    let args = Args::try_parse_from(["mapdata", "resolve"]).unwrap();
    assert_eq!(args.config, PathBuf::from("mapdata.toml"));
    match args.command {
        Command::Resolve {
            catalog,
            status,
            map_id,
            mods,
            json,
            ..
        } => {
            assert!(catalog.is_none());
            assert_eq!(status, "Playing");
            assert!(map_id.is_none());
            assert!(mods.is_none());
            assert!(!json);
        }
        _ => panic!("expected resolve"),
    }
}

#[test]
fn test_resolve_all_options() {
    let args = Args::try_parse_from([
        "mapdata",
        "--config",
        "custom.toml",
        "resolve",
        "--catalog",
        "maps.json",
        "--status",
        "Listening",
        "--map-id",
        "129891",
        "--artist",
        "xi",
        "--title",
        "FREEDOM DiVE",
        "--diff",
        "FOUR DIMENSIONS",
        "--mods",
        "24",
        "--json",
    ])
    .unwrap();

    assert_eq!(args.config, PathBuf::from("custom.toml"));
    match args.command {
        Command::Resolve {
            catalog,
            status,
            map_id,
            artist,
            title,
            diff,
            mods,
            json,
        } => {
            assert_eq!(catalog, Some(PathBuf::from("maps.json")));
            assert_eq!(status, "Listening");
            assert_eq!(map_id, Some(129891));
            assert_eq!(artist, "xi");
            assert_eq!(title, "FREEDOM DiVE");
            assert_eq!(diff, "FOUR DIMENSIONS");
            assert_eq!(mods, Some(24));
            assert!(json);
        }
        _ => panic!("expected resolve"),
    }
}

#[test]
fn test_patterns_status() {
    let args = Args::try_parse_from(["mapdata", "patterns", "--status", "Editing"]).unwrap();
    match args.command {
        Command::Patterns { status } => assert_eq!(status, "Editing"),
        _ => panic!("expected patterns"),
    }
}

#[test]
fn test_subcommand_required() {
    assert!(Args::try_parse_from(["mapdata"]).is_err());
}

#[test]
fn test_invalid_map_id() {
    assert!(Args::try_parse_from(["mapdata", "resolve", "--map-id", "abc"]).is_err());
}
