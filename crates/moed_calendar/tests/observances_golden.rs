//! Full-year observances from the analytic ephemeris for Jerusalem.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use moed_calendar::{
    CalendarError, DAY_FOURTEEN_OFFSET, MoonPhase, ObservanceKind, ObservanceRecord,
    compute_observances, compute_observances_for_years, resolve_anchors,
};
use moed_ephem::{AnalyticEphemeris, Ephemeris, EphemerisError, Observer};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn year(y: i32) -> Vec<ObservanceRecord> {
    compute_observances(&AnalyticEphemeris::default(), &Observer::jerusalem(), y).unwrap()
}

fn starts(records: &[ObservanceRecord]) -> Vec<NaiveDate> {
    records.iter().map(|r| r.start).collect()
}

#[test]
fn anchors_2024_to_2027() {
    let eph = AnalyticEphemeris::default();
    let expected = [
        (2024, date(2024, 3, 10), date(2024, 9, 3)),
        (2025, date(2025, 3, 29), date(2025, 9, 21)),
        (2026, date(2026, 3, 19), date(2026, 9, 11)),
        (2027, date(2027, 3, 8), date(2027, 8, 31)),
    ];
    for (y, spring, autumn) in expected {
        let a = resolve_anchors(&eph, y).unwrap();
        assert_eq!(a.spring.date, spring, "spring {y}");
        assert_eq!(a.autumn.date, autumn, "autumn {y}");
    }
}

#[test]
fn observances_2024() {
    let records = year(2024);
    assert_eq!(
        starts(&records),
        vec![
            date(2024, 3, 23),
            date(2024, 3, 24),
            date(2024, 3, 24),
            date(2024, 5, 12),
            date(2024, 9, 3),
            date(2024, 9, 12),
            date(2024, 9, 17),
            date(2024, 9, 24),
        ]
    );
    assert_eq!(records[0].weekday, Weekday::Sat);
    assert_eq!(records[2].weekday, Weekday::Sun);
    assert_eq!(records[4].weekday, Weekday::Tue);
    assert_eq!(records[4].moon_phase, MoonPhase::New);
}

#[test]
fn observances_2025() {
    let records = year(2025);
    assert_eq!(
        starts(&records),
        vec![
            date(2025, 4, 11),
            date(2025, 4, 12),
            date(2025, 4, 13),
            date(2025, 6, 1),
            date(2025, 9, 21),
            date(2025, 9, 30),
            date(2025, 10, 5),
            date(2025, 10, 12),
        ]
    );
    assert_eq!(records[0].weekday, Weekday::Fri);
}

#[test]
fn observances_2026() {
    let records = year(2026);
    assert_eq!(
        starts(&records),
        vec![
            date(2026, 4, 1),
            date(2026, 4, 2),
            date(2026, 4, 5),
            date(2026, 5, 24),
            date(2026, 9, 11),
            date(2026, 9, 20),
            date(2026, 9, 25),
            date(2026, 10, 2),
        ]
    );
    let passover = &records[0];
    assert_eq!(passover.weekday, Weekday::Wed);
    assert_eq!(passover.moon_phase, MoonPhase::Full);
    assert_eq!(passover.lunisolar_date, "14 Nisan");
    assert_eq!(records[1].end, date(2026, 4, 8));
    assert_eq!(records[2].lunisolar_date, "18 Nisan (approx)");
    assert_eq!(records[2].moon_phase, MoonPhase::WaxingGibbous);
    assert_eq!(records[4].weekday, Weekday::Fri);
    assert_eq!(records[4].moon_phase, MoonPhase::New);
}

#[test]
fn passover_eve_sunset_2026() {
    let records = year(2026);
    let passover = &records[0];
    let expected = Utc.with_ymd_and_hms(2026, 3, 31, 16, 2, 7).unwrap();
    let off = (passover.eve_sunset - expected).num_seconds().abs();
    assert!(off <= 180, "eve sunset {} off by {off} s", passover.eve_sunset);
    let local = passover
        .eve_sunset
        .with_timezone(&chrono_tz::Asia::Jerusalem)
        .format("%I:%M %p")
        .to_string();
    assert_eq!(passover.eve_sunset_local, local);
    assert!(local.ends_with("PM"), "local = {local}");
}

#[test]
fn eve_sunsets_fall_on_local_eve_west_of_greenwich() {
    let tz = chrono_tz::America::New_York;
    let new_york = Observer::new("New York", 40.7128, -74.006, 10.0, tz).unwrap();
    let records = compute_observances(&AnalyticEphemeris::default(), &new_york, 2026).unwrap();
    let pentecost = &records[ObservanceKind::Pentecost.index() as usize];
    assert_eq!(pentecost.start, date(2026, 5, 24));
    assert_eq!(pentecost.eve_sunset.with_timezone(&tz).date_naive(), date(2026, 5, 23));
    for r in &records {
        let local = r.eve_sunset.with_timezone(&tz);
        assert_eq!(local.date_naive(), r.start - Duration::days(1), "{}", r.name);
        assert!(r.eve_sunset_local.ends_with("PM"), "{}: {}", r.name, r.eve_sunset_local);
    }
}

/// 2027: day 14 (March 21) is itself a Sunday, so Firstfruits moves a week on.
#[test]
fn observances_2027_sunday_tie_break() {
    let records = year(2027);
    assert_eq!(records[0].start, date(2027, 3, 21));
    assert_eq!(records[0].weekday, Weekday::Sun);
    assert_eq!(records[2].start, date(2027, 3, 28));
    assert_eq!(records[3].start, date(2027, 5, 16));
    assert_eq!(records[4].start, date(2027, 8, 31));
}

#[test]
fn spring_anchor_is_first_qualifying_new_moon() {
    let eph = AnalyticEphemeris::default();
    for y in (1800..=2200).step_by(7) {
        let a = resolve_anchors(&eph, y).unwrap();
        let day_fourteen = a.spring.new_moon + Duration::days(DAY_FOURTEEN_OFFSET);
        assert!(day_fourteen >= a.equinox, "{y}: {} < {}", day_fourteen, a.equinox);
        let previous = eph
            .next_new_moon(a.spring.new_moon - Duration::days(35))
            .unwrap();
        assert!(previous < a.spring.new_moon, "{y}");
        assert!(
            previous + Duration::days(DAY_FOURTEEN_OFFSET) < a.equinox,
            "{y}: earlier new moon {previous} also qualifies"
        );
    }
}

#[test]
fn autumn_cycle_ordered_across_years() {
    let eph = AnalyticEphemeris::default();
    let observer = Observer::jerusalem();
    for y in (1950..=2100).step_by(15) {
        let records = compute_observances(&eph, &observer, y).unwrap();
        assert_eq!(records.len(), 8);
        let autumn = &records[4..];
        assert_eq!(autumn[0].kind, ObservanceKind::Trumpets);
        for pair in autumn.windows(2) {
            assert!(pair[0].end < pair[1].start, "{y}: {} / {}", pair[0].name, pair[1].name);
        }
        assert!(records[0].start.month() == 3 || records[0].start.month() == 4, "{y}");
    }
}

#[test]
fn parallel_matches_sequential() {
    let eph = AnalyticEphemeris::default();
    let observer = Observer::jerusalem();
    let years = [2024, 2025, 2026, 2027];
    let parallel = compute_observances_for_years(&eph, &observer, &years);
    for (y, result) in years.iter().zip(parallel) {
        assert_eq!(result.unwrap(), compute_observances(&eph, &observer, *y).unwrap());
    }
}

#[test]
fn year_outside_ephemeris_fails() {
    let err =
        compute_observances(&AnalyticEphemeris::default(), &Observer::jerusalem(), 3500).unwrap_err();
    assert!(matches!(
        err,
        CalendarError::AstronomicalLookup {
            year: 3500,
            source: EphemerisError::YearOutOfRange { year: 3500 }
        }
    ));
}
