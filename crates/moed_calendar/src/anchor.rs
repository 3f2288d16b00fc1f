//! Anchor resolution: Day 1 of the spring and autumn lunisolar months.
//!
//! The spring anchor is the first new moon whose 14th day (new moon + 13 days)
//! falls on or after the March equinox. The autumn anchor is the first new moon
//! at or after the spring anchor + 170 days. The autumn anchor carries no
//! equinox-relative check.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use moed_ephem::Ephemeris;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{CalculationError, CalendarError, lookup};

/// Days before the equinox at which the spring new-moon search begins.
pub const EQUINOX_MARGIN_DAYS: i64 = 30;

/// Offset from Day 1 to Day 14 of a lunisolar month.
pub const DAY_FOURTEEN_OFFSET: i64 = 13;

/// Days from the spring anchor to the start of the autumn new-moon search.
pub const AUTUMN_SEARCH_DAYS: i64 = 170;

/// Maximum new-moon lookups for the spring anchor. Two suffice for any real
/// equinox.
pub const MAX_SPRING_ITERATIONS: usize = 6;

/// Day 1 of a lunisolar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    /// UTC calendar date of the new moon.
    pub date: NaiveDate,
    /// The new-moon instant the date was taken from.
    pub new_moon: DateTime<Utc>,
}

impl Anchor {
    fn from_new_moon(new_moon: DateTime<Utc>) -> Self {
        Self {
            date: new_moon.date_naive(),
            new_moon,
        }
    }
}

/// Both anchors of one solar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchors {
    pub year: i32,
    /// The March equinox the spring anchor was resolved against.
    pub equinox: DateTime<Utc>,
    /// Anchor A (spring cycle).
    pub spring: Anchor,
    /// Anchor B (autumn cycle).
    pub autumn: Anchor,
}

impl Anchors {
    /// Check the spring equinox bound and the order of the two cycles.
    pub fn validate(&self) -> Result<(), CalculationError> {
        let day_fourteen = add_days(self.year, self.spring.new_moon, DAY_FOURTEEN_OFFSET)?;
        if day_fourteen < self.equinox {
            warn!(year = self.year, anchor = %self.spring.date, equinox = %self.equinox, "spring anchor precedes equinox bound");
            return Err(CalculationError::EquinoxBound {
                year: self.year,
                anchor: self.spring.date,
                equinox: self.equinox,
            });
        }
        if self.autumn.date <= self.spring.date {
            warn!(year = self.year, spring = %self.spring.date, autumn = %self.autumn.date, "autumn anchor does not follow spring anchor");
            return Err(CalculationError::Overlap {
                year: self.year,
                earlier: "spring cycle",
                later: "autumn cycle",
            });
        }
        Ok(())
    }
}

/// Resolve both anchors for `year`.
pub fn resolve_anchors<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    year: i32,
) -> Result<Anchors, CalendarError> {
    let equinox = lookup(year, ephemeris.next_spring_equinox(year))?;
    let spring = resolve_spring_anchor(ephemeris, year, equinox)?;
    let autumn = resolve_autumn_anchor(ephemeris, year, &spring)?;
    let anchors = Anchors {
        year,
        equinox,
        spring,
        autumn,
    };
    anchors.validate()?;
    info!(year, %equinox, spring = %spring.date, autumn = %autumn.date, "anchors resolved");
    Ok(anchors)
}

/// Resolve Anchor A: the first new moon N with `N + 13 days >= equinox`.
///
/// The comparison is made on instants and is non-strict.
pub fn resolve_spring_anchor<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    year: i32,
    equinox: DateTime<Utc>,
) -> Result<Anchor, CalendarError> {
    let mut search_from = add_days(year, equinox, -EQUINOX_MARGIN_DAYS)?;
    for iteration in 1..=MAX_SPRING_ITERATIONS {
        let new_moon = lookup(year, ephemeris.next_new_moon(search_from))?;
        let day_fourteen = add_days(year, new_moon, DAY_FOURTEEN_OFFSET)?;
        let accepted = day_fourteen >= equinox;
        debug!(year, iteration, %search_from, %new_moon, accepted, "spring anchor candidate");
        if accepted {
            return Ok(Anchor::from_new_moon(new_moon));
        }
        search_from = add_days(year, new_moon, 1)?;
    }
    warn!(year, iterations = MAX_SPRING_ITERATIONS, "spring anchor search exhausted");
    Err(CalculationError::SearchExhausted {
        year,
        iterations: MAX_SPRING_ITERATIONS,
    }
    .into())
}

/// Resolve Anchor B: the first new moon at or after midnight UTC of
/// `spring.date + 170 days`.
pub fn resolve_autumn_anchor<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    year: i32,
    spring: &Anchor,
) -> Result<Anchor, CalendarError> {
    let search_from = add_days(year, midnight_utc(spring.date), AUTUMN_SEARCH_DAYS)?;
    let new_moon = lookup(year, ephemeris.next_new_moon(search_from))?;
    debug!(year, %search_from, %new_moon, "autumn anchor");
    Ok(Anchor::from_new_moon(new_moon))
}

pub(crate) fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn add_days(year: i32, at: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>, CalculationError> {
    TimeDelta::try_days(days)
        .and_then(|delta| at.checked_add_signed(delta))
        .ok_or(CalculationError::DateOverflow { year })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn anchors(spring: DateTime<Utc>, autumn: DateTime<Utc>, equinox: DateTime<Utc>) -> Anchors {
        Anchors {
            year: 2024,
            equinox,
            spring: Anchor::from_new_moon(spring),
            autumn: Anchor::from_new_moon(autumn),
        }
    }

    #[test]
    fn anchor_date_is_utc_date_of_new_moon() {
        let a = Anchor::from_new_moon(utc(2026, 3, 19, 1));
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2026, 3, 19).unwrap());
    }

    #[test]
    fn validate_accepts_exact_bound() {
        let a = anchors(utc(2024, 3, 7, 3), utc(2024, 9, 1, 0), utc(2024, 3, 20, 3));
        assert_eq!(a.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_early_spring_anchor() {
        let a = anchors(utc(2024, 3, 7, 2), utc(2024, 9, 1, 0), utc(2024, 3, 20, 3));
        assert!(matches!(
            a.validate(),
            Err(CalculationError::EquinoxBound { year: 2024, .. })
        ));
    }

    #[test]
    fn validate_rejects_autumn_before_spring() {
        let a = anchors(utc(2024, 3, 10, 9), utc(2024, 3, 10, 9), utc(2024, 3, 20, 3));
        assert!(matches!(a.validate(), Err(CalculationError::Overlap { .. })));
    }

    #[test]
    fn midnight_is_start_of_day() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(midnight_utc(d), utc(2024, 3, 10, 0));
    }

    #[test]
    fn add_days_overflow_is_error() {
        assert_eq!(
            add_days(2024, utc(2024, 1, 1, 0), i64::MAX),
            Err(CalculationError::DateOverflow { year: 2024 })
        );
    }
}
