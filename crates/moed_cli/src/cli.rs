use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Lunisolar observance calendar.
#[derive(Debug, Parser)]
#[command(
    name = "moed",
    version,
    about = "Lunisolar anchor-and-offset observance calendar"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub observer: ObserverArgs,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Observer overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ObserverArgs {
    /// Latitude in degrees, north positive.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees, east positive.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Elevation above sea level in meters.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub elevation: Option<f64>,

    /// IANA time zone for local times (e.g. America/New_York).
    #[arg(long, global = true)]
    pub tz: Option<String>,

    /// Place name used in sunset annotations.
    #[arg(long, global = true)]
    pub place: Option<String>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Observances of one year.
    Observances(ObservancesArgs),
    /// Observances of a span of years, computed in parallel.
    Range(RangeArgs),
    /// Spring and autumn anchors of one year.
    Anchors(YearArgs),
    /// March equinox of one year.
    Equinox(YearArgs),
    /// First new moon at or after an instant.
    NewMoon(DateArgs),
    /// Sunset on a local calendar date.
    Sunset(DateArgs),
    /// Moon illumination and phase at an instant.
    MoonPhase(DateArgs),
}

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

#[derive(Debug, clap::Args)]
pub struct ObservancesArgs {
    /// Gregorian year (default: current year).
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Free-text selection, e.g. "passover sukkot" (default: all).
    #[arg(long)]
    pub only: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, clap::Args)]
pub struct RangeArgs {
    /// First year.
    #[arg(long)]
    pub from: i32,

    /// Last year, inclusive.
    #[arg(long)]
    pub to: i32,

    /// Free-text selection (default: all).
    #[arg(long)]
    pub only: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, clap::Args)]
pub struct YearArgs {
    /// Gregorian year (default: current year).
    #[arg(short, long)]
    pub year: Option<i32>,
}

#[derive(Debug, clap::Args)]
pub struct DateArgs {
    /// RFC 3339 instant or YYYY-MM-DD (default: now).
    #[arg(short, long)]
    pub date: Option<String>,
}
