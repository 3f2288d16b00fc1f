use std::io::Write;

use clap::Parser;
use moed_cli::cli::{Cli, Command, OutputFormat};
use moed_cli::commands::Context;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args.iter().copied()).unwrap()
}

#[test]
fn observances_defaults() {
    let cli = parse(&["moed", "observances", "--year", "2026"]);
    assert_eq!(cli.verbose, 0);
    assert!(cli.config.is_none());
    match cli.command {
        Command::Observances(args) => {
            assert_eq!(args.year, Some(2026));
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.only.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn observances_format_and_selection() {
    let cli = parse(&[
        "moed",
        "observances",
        "-y",
        "2027",
        "--only",
        "passover sukkot",
        "--format",
        "json",
    ]);
    match cli.command {
        Command::Observances(args) => {
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.only.as_deref(), Some("passover sukkot"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&[
        "moed",
        "sunset",
        "--date",
        "2024-06-21",
        "-vv",
        "--lat",
        "40.7128",
        "--lon",
        "-74.006",
        "--tz",
        "America/New_York",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.observer.lat, Some(40.7128));
    assert_eq!(cli.observer.lon, Some(-74.006));
    assert_eq!(cli.observer.tz.as_deref(), Some("America/New_York"));
    assert!(matches!(cli.command, Command::Sunset(_)));
}

#[test]
fn range_requires_bounds() {
    assert!(Cli::try_parse_from(["moed", "range", "--from", "2024"]).is_err());
    let cli = parse(&["moed", "range", "--from", "2024", "--to", "2026", "-f", "markdown"]);
    match cli.command {
        Command::Range(args) => {
            assert_eq!((args.from, args.to), (2024, 2026));
            assert_eq!(args.format, OutputFormat::Markdown);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn unknown_format_rejected() {
    assert!(Cli::try_parse_from(["moed", "observances", "--format", "xml"]).is_err());
}

#[test]
fn every_subcommand_parses() {
    for args in [
        vec!["moed", "anchors", "--year", "2026"],
        vec!["moed", "equinox"],
        vec!["moed", "new-moon", "--date", "2024-03-01T00:00:00Z"],
        vec!["moed", "moon-phase", "-d", "2024-01-25"],
    ] {
        assert!(Cli::try_parse_from(args.iter().copied()).is_ok(), "{args:?}");
    }
}

#[test]
fn context_from_config_and_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[observer]\nname = \"London\"\nlatitude_deg = 51.5074\nlongitude_deg = -0.1278\nelevation_m = 11.0\ntime_zone = \"Europe/London\"").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let cli = parse(&["moed", "--config", &path, "equinox", "--elevation", "0"]);
    let ctx = Context::new(cli.config.as_deref(), &cli.observer).unwrap();
    assert_eq!(ctx.observer.name, "London");
    assert_eq!(ctx.observer.elevation_m, 0.0);
    assert_eq!(ctx.observer.time_zone.name(), "Europe/London");
}

#[test]
fn context_rejects_bad_zone() {
    let cli = parse(&["moed", "equinox", "--tz", "Atlantis/Capital"]);
    let err = Context::new(cli.config.as_deref(), &cli.observer).err().unwrap();
    assert!(format!("{err:#}").contains("Atlantis/Capital"));
}
