//! Presentation of resolved observances.
//!
//! Pure transforms: nothing here recomputes or alters a resolved value.

use std::fmt::Write;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use crate::observance::weekday_name;
use crate::observance_types::{ObservanceKind, ObservanceRecord};

/// Human-readable fields of one observance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservanceDisplay {
    /// "Passover (Pesach)"
    pub title: String,
    /// "April 1, 2026 (begins at sunset on March 31)"
    pub gregorian_date_text: String,
    /// "1 day" or "7 days, through April 8, 2026"
    pub duration_text: String,
    pub lunisolar_date: String,
    pub moon_phase: String,
    pub day_of_week: String,
    /// "~06:02 PM (Jerusalem time)"
    pub sunset_time: String,
}

impl From<&ObservanceRecord> for ObservanceDisplay {
    fn from(record: &ObservanceRecord) -> Self {
        let eve = record
            .start
            .checked_sub_days(Days::new(1))
            .map(|d| format!(" (begins at sunset on {})", d.format("%B %-d")))
            .unwrap_or_default();
        let duration_text = if record.duration_days <= 1 {
            "1 day".to_string()
        } else {
            format!("{} days, through {}", record.duration_days, long_date(record.end))
        };
        Self {
            title: format!("{} ({})", record.name, record.alternate_name),
            gregorian_date_text: format!("{}{eve}", long_date(record.start)),
            duration_text,
            lunisolar_date: record.lunisolar_date.clone(),
            moon_phase: record.moon_phase.name().to_string(),
            day_of_week: weekday_name(record.weekday).to_string(),
            sunset_time: format!("~{} ({} time)", record.eve_sunset_local, record.place),
        }
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Markdown report, one section per record.
pub fn render_report(year: i32, records: &[ObservanceRecord]) -> String {
    let mut out = format!("**Observances for {year}**\n");
    for record in records {
        let d = ObservanceDisplay::from(record);
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\n### {}\n\
             - **Gregorian Date:** {}\n\
             - **Duration:** {}\n\
             - **Lunisolar Date:** {}\n\
             - **Moon Phase:** {}\n\
             - **Day of Week:** {}\n\
             - **Sunset:** {}\n",
            d.title,
            d.gregorian_date_text,
            d.duration_text,
            d.lunisolar_date,
            d.moon_phase,
            d.day_of_week,
            d.sunset_time,
        );
    }
    out
}

/// Plain-text table, one line per record.
pub fn render_text(year: i32, records: &[ObservanceRecord]) -> String {
    let mut out = match records.first() {
        Some(first) => format!("Observances for {year} ({})\n", first.place),
        None => format!("Observances for {year}\n"),
    };
    for r in records {
        let _ = writeln!(
            out,
            "  {:<44} {} {}  {:>2}d  {:<18} {:<16} sunset {}",
            format!("{} ({})", r.name, r.alternate_name),
            &weekday_name(r.weekday)[..3],
            r.start,
            r.duration_days,
            r.lunisolar_date,
            r.moon_phase.name(),
            r.eve_sunset_local,
        );
    }
    out
}

#[derive(Serialize)]
struct JsonReport {
    year: i32,
    observances: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonEntry {
    kind: ObservanceKind,
    start: NaiveDate,
    end: NaiveDate,
    moon_illumination: f64,
    eve_sunset: DateTime<Utc>,
    #[serde(flatten)]
    display: ObservanceDisplay,
}

fn json_report(year: i32, records: &[ObservanceRecord]) -> JsonReport {
    let observances = records
        .iter()
        .map(|r| JsonEntry {
            kind: r.kind,
            start: r.start,
            end: r.end,
            moon_illumination: r.moon_illumination,
            eve_sunset: r.eve_sunset,
            display: ObservanceDisplay::from(r),
        })
        .collect();
    JsonReport { year, observances }
}

/// JSON document with both the display strings and the resolved values.
pub fn render_json(year: i32, records: &[ObservanceRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json_report(year, records))
}

/// JSON array with one [`render_json`] document per year.
pub fn render_json_years(
    years: &[(i32, Vec<ObservanceRecord>)],
) -> Result<String, serde_json::Error> {
    let reports: Vec<JsonReport> = years
        .iter()
        .map(|(year, records)| json_report(*year, records))
        .collect();
    serde_json::to_string_pretty(&reports)
}
