//! Julian Date conversions.
//!
//! Calendar conversions follow Meeus, *Astronomical Algorithms*, ch. 7, always
//! using the Gregorian correction so that they agree with `chrono`'s proleptic
//! Gregorian calendar.

use chrono::{DateTime, Utc};

use crate::error::TimeError;

/// Julian Date of J2000.0 (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

const MILLIS_PER_DAY: f64 = SECONDS_PER_DAY * 1000.0;

/// Julian Date from a proleptic Gregorian calendar date.
///
/// `day` may carry a fractional part (e.g. `20.5` is noon on the 20th).
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (f64::from(year) - 1.0, f64::from(month) + 12.0)
    } else {
        (f64::from(year), f64::from(month))
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Proleptic Gregorian `(year, month, fractional day)` from a Julian Date.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd5 = jd + 0.5;
    let z = jd5.floor();
    let f = jd5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Julian Date (UT) of a UTC instant, at millisecond resolution.
pub fn jd_from_utc(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// UTC instant from a Julian Date (UT), rounded to the nearest millisecond.
pub fn utc_from_jd(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::InstantOutOfRange { jd });
    }
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return Err(TimeError::InstantOutOfRange { jd });
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64).ok_or(TimeError::InstantOutOfRange { jd })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn j2000_calendar() {
        let jd = calendar_to_jd(2000, 1, 1.5);
        assert!((jd - J2000_JD).abs() < 1e-9, "got {jd}");
    }

    #[test]
    fn meeus_example_7a() {
        // Sputnik launch: 1957 Oct 4.81 → JD 2436116.31
        let jd = calendar_to_jd(1957, 10, 4.81);
        assert!((jd - 2_436_116.31).abs() < 1e-6, "got {jd}");
    }

    #[test]
    fn calendar_roundtrip_february() {
        let jd = calendar_to_jd(2024, 2, 29.25);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2024, 2));
        assert!((d - 29.25).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn unix_epoch() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(jd_from_utc(&epoch), UNIX_EPOCH_JD);
    }

    #[test]
    fn utc_roundtrip_millis() {
        let t = Utc.with_ymd_and_hms(2026, 3, 20, 14, 45, 32).unwrap();
        let back = utc_from_jd(jd_from_utc(&t)).unwrap();
        assert!((back - t).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn non_finite_rejected() {
        assert!(utc_from_jd(f64::NAN).is_err());
        assert!(utc_from_jd(f64::INFINITY).is_err());
    }

    #[test]
    fn centuries_at_j2000() {
        assert_eq!(jd_to_centuries(J2000_JD), 0.0);
        assert!((jd_to_centuries(J2000_JD + DAYS_PER_CENTURY) - 1.0).abs() < 1e-15);
    }
}
