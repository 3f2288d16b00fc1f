//! Subcommand handlers.

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use moed_calendar::{
    MoonPhase, ObservanceKind, ObservanceRecord, compute_observances,
    compute_observances_for_years, local_midnight, render_json, render_json_years, render_report,
    render_text, resolve_anchors, select,
};
use moed_config::{MoedConfig, parse_time_zone};
use moed_ephem::{AnalyticEphemeris, Ephemeris, MAX_YEAR, MIN_YEAR, Observer};
use tracing::info;

use crate::cli::{
    Cli, Command, DateArgs, ObservancesArgs, ObserverArgs, OutputFormat, RangeArgs, YearArgs,
};

/// Ephemeris and observer shared by every subcommand.
pub struct Context {
    pub ephemeris: AnalyticEphemeris,
    pub observer: Observer,
}

impl Context {
    /// Load the configuration file (if any) and apply command-line overrides.
    pub fn new(config_path: Option<&Path>, overrides: &ObserverArgs) -> Result<Self> {
        if let Some(tz) = &overrides.tz {
            check_time_zone(tz)?;
        }
        let mut config = match config_path {
            Some(path) => MoedConfig::load(path)?,
            None => MoedConfig::default(),
        };
        apply_overrides(&mut config, overrides);
        let observer = config.observer().context("invalid observer")?;
        let ephemeris = config.ephemeris()?;
        info!(place = %observer.name, lat = observer.latitude_deg, lon = observer.longitude_deg, "observer ready");
        Ok(Self {
            ephemeris,
            observer,
        })
    }
}

/// Fold observer flags into the loaded configuration.
///
/// Moving the coordinates without naming the place relabels it with the
/// coordinates themselves.
pub fn apply_overrides(config: &mut MoedConfig, args: &ObserverArgs) {
    let o = &mut config.observer;
    if let Some(lat) = args.lat {
        o.latitude_deg = lat;
    }
    if let Some(lon) = args.lon {
        o.longitude_deg = lon;
    }
    if let Some(elevation) = args.elevation {
        o.elevation_m = elevation;
    }
    if let Some(tz) = &args.tz {
        o.time_zone.clone_from(tz);
    }
    match &args.place {
        Some(place) => o.name.clone_from(place),
        None if args.lat.is_some() || args.lon.is_some() => {
            o.name = format!("{:.4}, {:.4}", o.latitude_deg, o.longitude_deg);
        }
        None => {}
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::new(cli.config.as_deref(), &cli.observer)?;
    match cli.command {
        Command::Observances(args) => observances(&ctx, args),
        Command::Range(args) => range(&ctx, args),
        Command::Anchors(args) => anchors(&ctx, args),
        Command::Equinox(args) => equinox(&ctx, args),
        Command::NewMoon(args) => new_moon(&ctx, args),
        Command::Sunset(args) => sunset(&ctx, args),
        Command::MoonPhase(args) => moon_phase(&ctx, args),
    }
}

fn observances(ctx: &Context, args: ObservancesArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(current_year);
    let records = compute_observances(&ctx.ephemeris, &ctx.observer, year)?;
    let records = filter(records, args.only.as_deref());
    let out = match args.format {
        OutputFormat::Text => render_text(year, &records),
        OutputFormat::Markdown => render_report(year, &records),
        OutputFormat::Json => render_json(year, &records)?,
    };
    println!("{}", out.trim_end());
    Ok(())
}

fn range(ctx: &Context, args: RangeArgs) -> Result<()> {
    let years = year_span(args.from, args.to)?;
    let results = compute_observances_for_years(&ctx.ephemeris, &ctx.observer, &years);
    let mut resolved = Vec::with_capacity(years.len());
    for (year, result) in years.iter().zip(results) {
        resolved.push((*year, filter(result?, args.only.as_deref())));
    }
    let out = match args.format {
        OutputFormat::Json => render_json_years(&resolved)?,
        OutputFormat::Text | OutputFormat::Markdown => resolved
            .iter()
            .map(|(year, records)| match args.format {
                OutputFormat::Markdown => render_report(*year, records),
                _ => render_text(*year, records),
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    println!("{}", out.trim_end());
    Ok(())
}

fn anchors(ctx: &Context, args: YearArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(current_year);
    let a = resolve_anchors(&ctx.ephemeris, year)?;
    println!("Anchors for {year}");
    println!("  March equinox:  {}", a.equinox.to_rfc3339());
    println!(
        "  Spring (A):     {}  (new moon {})",
        a.spring.date,
        a.spring.new_moon.to_rfc3339()
    );
    println!(
        "  Autumn (B):     {}  (new moon {})",
        a.autumn.date,
        a.autumn.new_moon.to_rfc3339()
    );
    Ok(())
}

fn equinox(ctx: &Context, args: YearArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(current_year);
    let at = ctx
        .ephemeris
        .next_spring_equinox(year)
        .with_context(|| format!("no equinox for {year}"))?;
    println!("March equinox {year}: {}", describe(ctx, at));
    Ok(())
}

fn new_moon(ctx: &Context, args: DateArgs) -> Result<()> {
    let from = parse_instant(args.date.as_deref())?;
    let at = ctx.ephemeris.next_new_moon(from)?;
    println!("Next new moon: {}", describe(ctx, at));
    Ok(())
}

fn sunset(ctx: &Context, args: DateArgs) -> Result<()> {
    let day = match args.date.as_deref() {
        Some(s) => parse_date(s)?,
        None => Utc::now().with_timezone(&ctx.observer.time_zone).date_naive(),
    };
    let from = local_midnight(day, &ctx.observer);
    let at = ctx.ephemeris.next_sunset(from, &ctx.observer)?;
    println!("Sunset at {} on {day}: {}", ctx.observer.name, describe(ctx, at));
    Ok(())
}

fn moon_phase(ctx: &Context, args: DateArgs) -> Result<()> {
    let at = parse_instant(args.date.as_deref())?;
    let illumination = ctx.ephemeris.moon_illumination(at)?;
    println!(
        "{}: {illumination:.1}% illuminated ({})",
        at.to_rfc3339(),
        MoonPhase::classify(illumination)
    );
    Ok(())
}

fn filter(records: Vec<ObservanceRecord>, only: Option<&str>) -> Vec<ObservanceRecord> {
    match only {
        Some(query) => select(records, &ObservanceKind::matching(query)),
        None => records,
    }
}

fn describe(ctx: &Context, at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&ctx.observer.time_zone);
    format!(
        "{} UTC ({} {})",
        at.format("%Y-%m-%d %H:%M:%S"),
        local.format("%Y-%m-%d %I:%M %p"),
        ctx.observer.time_zone.name()
    )
}

fn current_year() -> i32 {
    Utc::now().year()
}

/// Parse an RFC 3339 instant or a bare `YYYY-MM-DD` (midnight UTC).
/// `None` means now.
pub fn parse_instant(s: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(s) = s else {
        return Ok(Utc::now());
    };
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("expected RFC 3339 or YYYY-MM-DD, got {s:?}"))?;
    Ok(day.and_time(NaiveTime::MIN).and_utc())
}

/// Parse a `YYYY-MM-DD` date, or take the UTC date of an RFC 3339 instant.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.date_naive())
        .with_context(|| format!("expected YYYY-MM-DD, got {s:?}"))
}

/// Years `from..=to`, both ends inside the ephemeris window.
pub fn year_span(from: i32, to: i32) -> Result<Vec<i32>> {
    if from > to {
        bail!("--from {from} is after --to {to}");
    }
    for (flag, year) in [("--from", from), ("--to", to)] {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            bail!("{flag} {year} is outside the supported years {MIN_YEAR}-{MAX_YEAR}");
        }
    }
    Ok((from..=to).collect())
}

/// Validate a `--tz` value early so the error names the flag.
pub fn check_time_zone(name: &str) -> Result<()> {
    parse_time_zone(name).with_context(|| format!("--tz {name}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_forms() {
        let a = parse_instant(Some("2024-03-10T09:00:00Z")).unwrap();
        let b = parse_instant(Some("2024-03-10T11:00:00+02:00")).unwrap();
        assert_eq!(a, b);
        let c = parse_instant(Some("2024-03-10")).unwrap();
        assert_eq!(c.to_rfc3339(), "2024-03-10T00:00:00+00:00");
        assert!(parse_instant(Some("March 10")).is_err());
    }

    #[test]
    fn date_forms() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        assert_eq!(parse_date("2024-06-21").unwrap(), d);
        assert_eq!(parse_date("2024-06-21T23:00:00Z").unwrap(), d);
        assert!(parse_date("21/06/2024").is_err());
    }

    #[test]
    fn coordinates_relabel_place() {
        let mut config = MoedConfig::default();
        let args = ObserverArgs {
            lat: Some(40.7128),
            lon: Some(-74.006),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.observer.name, "40.7128, -74.0060");
        assert_eq!(config.observer.time_zone, "Asia/Jerusalem");
    }

    #[test]
    fn explicit_place_wins() {
        let mut config = MoedConfig::default();
        let args = ObserverArgs {
            lat: Some(40.7128),
            lon: Some(-74.006),
            tz: Some("America/New_York".into()),
            place: Some("New York".into()),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);
        let observer = config.observer().unwrap();
        assert_eq!(observer.name, "New York");
        assert_eq!(observer.time_zone.name(), "America/New_York");
    }

    #[test]
    fn year_span_bounds() {
        assert_eq!(year_span(2024, 2026).unwrap(), vec![2024, 2025, 2026]);
        assert_eq!(year_span(MIN_YEAR, MIN_YEAR).unwrap(), vec![MIN_YEAR]);
        assert!(year_span(2026, 2024).is_err());
        let err = year_span(-2_000_000_000, 2_000_000_000).unwrap_err();
        assert!(err.to_string().starts_with("--from -2000000000 is outside"), "{err}");
        let err = year_span(2024, MAX_YEAR + 1).unwrap_err();
        assert!(err.to_string().starts_with("--to 3001"), "{err}");
    }

    #[test]
    fn time_zone_check() {
        assert!(check_time_zone("Europe/London").is_ok());
        let err = check_time_zone("Nowhere/Land").unwrap_err();
        assert!(format!("{err:#}").contains("--tz Nowhere/Land"));
    }
}
