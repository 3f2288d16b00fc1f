//! Observance derivation: anchors plus the fixed table to dated, annotated records.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc, Weekday};
use moed_ephem::{Ephemeris, Observer};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::anchor::{Anchors, midnight_utc, resolve_anchors};
use crate::error::{CalculationError, CalendarError, lookup};
use crate::moon_phase::MoonPhase;
use crate::observance_types::{
    CycleAnchor, OBSERVANCES, ObservanceDate, ObservanceDefinition, ObservanceKind,
    ObservanceRecord, OffsetRule, PENTECOST_COUNT_DAYS,
};

/// Compute every observance of `year`, in table order.
///
/// Either all eight records are returned or the year fails as a whole.
pub fn compute_observances<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    year: i32,
) -> Result<Vec<ObservanceRecord>, CalendarError> {
    let anchors = resolve_anchors(ephemeris, year)?;
    derive_observances(ephemeris, observer, &anchors)
}

/// Compute several years in parallel. Results are in input order.
pub fn compute_observances_for_years<E: Ephemeris + Sync + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    years: &[i32],
) -> Vec<Result<Vec<ObservanceRecord>, CalendarError>> {
    years
        .par_iter()
        .map(|&year| compute_observances(ephemeris, observer, year))
        .collect()
}

/// Annotate the observances of already-resolved anchors.
///
/// The anchors are validated first, so externally cached anchors get the same
/// checks as freshly resolved ones.
pub fn derive_observances<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    anchors: &Anchors,
) -> Result<Vec<ObservanceRecord>, CalendarError> {
    anchors.validate()?;
    let dates = derive_dates(anchors)?;
    dates
        .iter()
        .map(|date| annotate(ephemeris, observer, anchors.year, date))
        .collect()
}

/// Place every observance on the Gregorian calendar.
pub fn derive_dates(anchors: &Anchors) -> Result<Vec<ObservanceDate>, CalculationError> {
    let year = anchors.year;
    let dates = OBSERVANCES
        .iter()
        .map(|def| -> Result<ObservanceDate, CalculationError> {
            let anchor = match def.anchor {
                CycleAnchor::Spring => anchors.spring.date,
                CycleAnchor::Autumn => anchors.autumn.date,
            };
            let offset_days = resolve_offset(def, anchor, year)?;
            let start = add_days(anchor, offset_days, year)?;
            let end = add_days(start, i64::from(def.duration_days.max(1)) - 1, year)?;
            Ok(ObservanceDate {
                kind: def.kind,
                offset_days,
                start,
                end,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_cycle_order(year, &dates)?;
    Ok(dates)
}

/// Day offset of `def` from its anchor date.
pub fn resolve_offset(
    def: &ObservanceDefinition,
    anchor: NaiveDate,
    year: i32,
) -> Result<i64, CalculationError> {
    match def.rule {
        OffsetRule::Fixed(days) => Ok(days),
        OffsetRule::SundayAfter { base } => {
            let base_date = add_days(anchor, base, year)?;
            Ok(base + days_to_following_sunday(base_date))
        }
        OffsetRule::FiftyDayCount { from } => {
            Ok(resolve_offset(from.definition(), anchor, year)? + PENTECOST_COUNT_DAYS)
        }
    }
}

/// Days from `date` to the next Sunday strictly after it (1..=7).
///
/// A Sunday maps to the following Sunday, 7 days later.
pub fn days_to_following_sunday(date: NaiveDate) -> i64 {
    let days = 6 - i64::from(date.weekday().num_days_from_monday());
    if days == 0 { 7 } else { days }
}

/// Full English weekday name.
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// Fixed-offset observances of one cycle must be ordered and disjoint: each
// one ends before the next begins.
fn check_cycle_order(year: i32, dates: &[ObservanceDate]) -> Result<(), CalculationError> {
    for cycle in [CycleAnchor::Spring, CycleAnchor::Autumn] {
        let fixed: Vec<&ObservanceDate> = dates
            .iter()
            .filter(|d| {
                let def = d.kind.definition();
                def.anchor == cycle && matches!(def.rule, OffsetRule::Fixed(_))
            })
            .collect();
        for pair in fixed.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            if earlier.end >= later.start {
                warn!(year, earlier = %earlier.kind, later = %later.kind, "observance ranges overlap");
                return Err(CalculationError::Overlap {
                    year,
                    earlier: earlier.kind.name(),
                    later: later.kind.name(),
                });
            }
        }
    }
    Ok(())
}

fn annotate<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    observer: &Observer,
    year: i32,
    date: &ObservanceDate,
) -> Result<ObservanceRecord, CalendarError> {
    let def = date.kind.definition();
    let eve = date
        .start
        .checked_sub_days(Days::new(1))
        .ok_or(CalculationError::DateOverflow { year })?;
    let eve_sunset = lookup(year, ephemeris.next_sunset(local_midnight(eve, observer), observer))?;
    let eve_sunset_local = eve_sunset
        .with_timezone(&observer.time_zone)
        .format("%I:%M %p")
        .to_string();
    let moon_illumination = lookup(year, ephemeris.moon_illumination(midnight_utc(date.start)))?;
    let moon_phase = MoonPhase::classify(moon_illumination);
    debug!(
        year,
        observance = %date.kind,
        start = %date.start,
        offset = date.offset_days,
        %eve_sunset,
        moon_illumination,
        "observance resolved"
    );
    Ok(ObservanceRecord {
        kind: date.kind,
        name: def.name,
        alternate_name: def.alternate_name,
        start: date.start,
        end: date.end,
        duration_days: def.duration_days,
        offset_days: date.offset_days,
        weekday: date.start.weekday(),
        lunisolar_date: def.label.render(date.offset_days),
        moon_illumination,
        moon_phase,
        eve_sunset,
        eve_sunset_local,
        place: observer.name.clone(),
    })
}

fn add_days(date: NaiveDate, days: i64, year: i32) -> Result<NaiveDate, CalculationError> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
    .ok_or(CalculationError::DateOverflow { year })
}

/// Start of `date` in the observer's civil time zone, as a UTC instant.
///
/// Falls back to midnight UTC when the zone skips local midnight on that date.
pub fn local_midnight(date: NaiveDate, observer: &Observer) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN)
        .and_local_timezone(observer.time_zone)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| midnight_utc(date))
}

/// Filter records to the given kinds, keeping table order.
pub fn select(records: Vec<ObservanceRecord>, kinds: &[ObservanceKind]) -> Vec<ObservanceRecord> {
    records
        .into_iter()
        .filter(|r| kinds.contains(&r.kind))
        .collect()
}
