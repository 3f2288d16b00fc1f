//! The fixed observance table and the types resolved from it.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::Serialize;

use crate::error::ParseObservanceError;
use crate::moon_phase::MoonPhase;

/// Days counted from Firstfruits to Pentecost (the day after seven weeks).
pub const PENTECOST_COUNT_DAYS: i64 = 49;

/// The eight annual observances, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ObservanceKind {
    Passover,
    UnleavenedBread,
    Firstfruits,
    Pentecost,
    Trumpets,
    Atonement,
    Tabernacles,
    LastGreatDay,
}

/// All observances in table order (0 = Passover, 7 = Last Great Day).
pub const ALL_OBSERVANCES: [ObservanceKind; 8] = [
    ObservanceKind::Passover,
    ObservanceKind::UnleavenedBread,
    ObservanceKind::Firstfruits,
    ObservanceKind::Pentecost,
    ObservanceKind::Trumpets,
    ObservanceKind::Atonement,
    ObservanceKind::Tabernacles,
    ObservanceKind::LastGreatDay,
];

impl ObservanceKind {
    /// 0-based table index.
    pub const fn index(self) -> u8 {
        match self {
            Self::Passover => 0,
            Self::UnleavenedBread => 1,
            Self::Firstfruits => 2,
            Self::Pentecost => 3,
            Self::Trumpets => 4,
            Self::Atonement => 5,
            Self::Tabernacles => 6,
            Self::LastGreatDay => 7,
        }
    }

    /// All observances in table order.
    pub const fn all() -> &'static [ObservanceKind; 8] {
        &ALL_OBSERVANCES
    }

    /// The table entry for this observance.
    pub fn definition(self) -> &'static ObservanceDefinition {
        &OBSERVANCES[self.index() as usize]
    }

    /// Primary display name.
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Lower-case terms that select this observance in a free-text query.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Passover => &["passover", "pesach"],
            Self::UnleavenedBread => &["unleavened"],
            Self::Firstfruits => &["firstfruits"],
            Self::Pentecost => &["pentecost", "shavuot", "weeks"],
            Self::Trumpets => &["trumpets", "teruah"],
            Self::Atonement => &["atonement", "kippur"],
            Self::Tabernacles => &["tabernacles", "sukkot"],
            Self::LastGreatDay => &["last great"],
        }
    }

    /// Observances named anywhere in `query`, in table order.
    ///
    /// A query naming none of them selects all eight.
    pub fn matching(query: &str) -> Vec<ObservanceKind> {
        let query = query.to_lowercase();
        let matched: Vec<_> = ALL_OBSERVANCES
            .into_iter()
            .filter(|kind| kind.keywords().iter().any(|k| query.contains(k)))
            .collect();
        if matched.is_empty() {
            ALL_OBSERVANCES.to_vec()
        } else {
            matched
        }
    }

    fn ident(self) -> &'static str {
        match self {
            Self::Passover => "passover",
            Self::UnleavenedBread => "unleavenedbread",
            Self::Firstfruits => "firstfruits",
            Self::Pentecost => "pentecost",
            Self::Trumpets => "trumpets",
            Self::Atonement => "atonement",
            Self::Tabernacles => "tabernacles",
            Self::LastGreatDay => "lastgreatday",
        }
    }
}

impl Display for ObservanceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObservanceKind {
    type Err = ParseObservanceError;

    /// Accepts the kind name (`last-great-day`, `LastGreatDay`), the primary or
    /// alternate display name, or any selection keyword. Case and punctuation
    /// are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(ParseObservanceError(s.to_string()));
        }
        ALL_OBSERVANCES
            .into_iter()
            .find(|kind| {
                let def = kind.definition();
                kind.ident() == wanted
                    || normalize(def.name) == wanted
                    || normalize(def.alternate_name) == wanted
                    || kind.keywords().iter().any(|k| normalize(k) == wanted)
            })
            .ok_or_else(|| ParseObservanceError(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Which half-year anchor an observance counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CycleAnchor {
    /// Anchor A, Day 1 of the spring month.
    Spring,
    /// Anchor B, Day 1 of the autumn month.
    Autumn,
}

/// How an observance's day offset from its anchor is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffsetRule {
    /// Static offset in days.
    Fixed(i64),
    /// The first Sunday strictly after `anchor + base` days.
    SundayAfter { base: i64 },
    /// [`PENTECOST_COUNT_DAYS`] after the offset of another observance.
    FiftyDayCount { from: ObservanceKind },
}

/// Lunisolar day/month label shown next to the Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunisolarLabel {
    /// A fixed day of the month, e.g. "14 Nisan".
    Day { day: u32, month: &'static str },
    /// Day derived from the resolved offset, e.g. "16 Nisan (approx)".
    FromOffset { month: &'static str },
    /// Month only, the day being counted rather than fixed.
    Counted { month: &'static str },
}

impl LunisolarLabel {
    /// Render the label for an observance resolved at `offset_days`.
    pub fn render(self, offset_days: i64) -> String {
        match self {
            Self::Day { day, month } => format!("{day} {month}"),
            Self::FromOffset { month } => format!("{} {month} (approx)", offset_days + 1),
            Self::Counted { month } => format!("{month} (counted)"),
        }
    }
}

/// One row of the fixed observance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservanceDefinition {
    pub kind: ObservanceKind,
    pub name: &'static str,
    pub alternate_name: &'static str,
    pub anchor: CycleAnchor,
    pub rule: OffsetRule,
    pub duration_days: u32,
    pub label: LunisolarLabel,
}

/// The observance table, in output order.
pub static OBSERVANCES: [ObservanceDefinition; 8] = [
    ObservanceDefinition {
        kind: ObservanceKind::Passover,
        name: "Passover",
        alternate_name: "Pesach",
        anchor: CycleAnchor::Spring,
        rule: OffsetRule::Fixed(13),
        duration_days: 1,
        label: LunisolarLabel::Day { day: 14, month: "Nisan" },
    },
    ObservanceDefinition {
        kind: ObservanceKind::UnleavenedBread,
        name: "Feast of Unleavened Bread",
        alternate_name: "Chag HaMatzot",
        anchor: CycleAnchor::Spring,
        rule: OffsetRule::Fixed(14),
        duration_days: 7,
        label: LunisolarLabel::Day { day: 15, month: "Nisan" },
    },
    ObservanceDefinition {
        kind: ObservanceKind::Firstfruits,
        name: "Firstfruits",
        alternate_name: "Bikkurim",
        anchor: CycleAnchor::Spring,
        rule: OffsetRule::SundayAfter { base: 13 },
        duration_days: 1,
        label: LunisolarLabel::FromOffset { month: "Nisan" },
    },
    ObservanceDefinition {
        kind: ObservanceKind::Pentecost,
        name: "Pentecost",
        alternate_name: "Shavuot",
        anchor: CycleAnchor::Spring,
        rule: OffsetRule::FiftyDayCount {
            from: ObservanceKind::Firstfruits,
        },
        duration_days: 1,
        label: LunisolarLabel::Counted { month: "Sivan" },
    },
    ObservanceDefinition {
        kind: ObservanceKind::Trumpets,
        name: "Feast of Trumpets",
        alternate_name: "Yom Teruah",
        anchor: CycleAnchor::Autumn,
        rule: OffsetRule::Fixed(0),
        duration_days: 1,
        label: LunisolarLabel::Day { day: 1, month: "Tishrei" },
    },
    ObservanceDefinition {
        kind: ObservanceKind::Atonement,
        name: "Day of Atonement",
        alternate_name: "Yom Kippur",
        anchor: CycleAnchor::Autumn,
        rule: OffsetRule::Fixed(9),
        duration_days: 1,
        label: LunisolarLabel::Day { day: 10, month: "Tishrei" },
    },
    ObservanceDefinition {
        kind: ObservanceKind::Tabernacles,
        name: "Feast of Tabernacles",
        alternate_name: "Sukkot",
        anchor: CycleAnchor::Autumn,
        rule: OffsetRule::Fixed(14),
        duration_days: 7,
        label: LunisolarLabel::Day { day: 15, month: "Tishrei" },
    },
    ObservanceDefinition {
        kind: ObservanceKind::LastGreatDay,
        name: "The Last Great Day",
        alternate_name: "Shemini Atzeret",
        anchor: CycleAnchor::Autumn,
        rule: OffsetRule::Fixed(21),
        duration_days: 1,
        label: LunisolarLabel::Day { day: 22, month: "Tishrei" },
    },
];

/// Gregorian placement of one observance, before any ephemeris annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObservanceDate {
    pub kind: ObservanceKind,
    /// Days from the governing anchor to the first day.
    pub offset_days: i64,
    /// First day.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

/// A fully resolved observance for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservanceRecord {
    pub kind: ObservanceKind,
    pub name: &'static str,
    pub alternate_name: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: u32,
    pub offset_days: i64,
    pub weekday: Weekday,
    pub lunisolar_date: String,
    /// Moon illumination (0-100) at 00:00 UTC of the start date.
    pub moon_illumination: f64,
    pub moon_phase: MoonPhase,
    /// Sunset on the eve of the start date, when the observance begins.
    pub eve_sunset: DateTime<Utc>,
    /// `eve_sunset` as a 12-hour clock in the observer's time zone.
    pub eve_sunset_local: String,
    /// Observer label for the sunset annotation.
    pub place: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_index() {
        for (i, kind) in ALL_OBSERVANCES.iter().enumerate() {
            assert_eq!(kind.index() as usize, i);
            assert_eq!(kind.definition().kind, *kind);
        }
    }

    #[test]
    fn autumn_offsets() {
        let offsets: Vec<i64> = OBSERVANCES
            .iter()
            .filter(|d| d.anchor == CycleAnchor::Autumn)
            .map(|d| match d.rule {
                OffsetRule::Fixed(n) => n,
                _ => -1,
            })
            .collect();
        assert_eq!(offsets, vec![0, 9, 14, 21]);
    }

    #[test]
    fn matching_keywords() {
        assert_eq!(
            ObservanceKind::matching("When is Yom Kippur in 2026?"),
            vec![ObservanceKind::Atonement]
        );
        assert_eq!(
            ObservanceKind::matching("Pesach and SUKKOT"),
            vec![ObservanceKind::Passover, ObservanceKind::Tabernacles]
        );
        assert_eq!(
            ObservanceKind::matching("the last great day"),
            vec![ObservanceKind::LastGreatDay]
        );
    }

    #[test]
    fn matching_nothing_selects_all() {
        assert_eq!(ObservanceKind::matching("feasts of 2027").len(), 8);
        assert_eq!(ObservanceKind::matching("").len(), 8);
    }

    #[test]
    fn from_str_forms() {
        assert_eq!("passover".parse::<ObservanceKind>(), Ok(ObservanceKind::Passover));
        assert_eq!("last-great-day".parse::<ObservanceKind>(), Ok(ObservanceKind::LastGreatDay));
        assert_eq!("Shemini Atzeret".parse::<ObservanceKind>(), Ok(ObservanceKind::LastGreatDay));
        assert_eq!("UnleavenedBread".parse::<ObservanceKind>(), Ok(ObservanceKind::UnleavenedBread));
        assert_eq!("weeks".parse::<ObservanceKind>(), Ok(ObservanceKind::Pentecost));
        assert_eq!("Yom Teruah".parse::<ObservanceKind>(), Ok(ObservanceKind::Trumpets));
        assert!("hanukkah".parse::<ObservanceKind>().is_err());
        assert!("".parse::<ObservanceKind>().is_err());
    }

    #[test]
    fn labels() {
        let ff = ObservanceKind::Firstfruits.definition().label;
        assert_eq!(ff.render(15), "16 Nisan (approx)");
        assert_eq!(ObservanceKind::Passover.definition().label.render(13), "14 Nisan");
        assert_eq!(
            ObservanceKind::Pentecost.definition().label.render(64),
            "Sivan (counted)"
        );
    }

    #[test]
    fn display_is_primary_name() {
        assert_eq!(ObservanceKind::Atonement.to_string(), "Day of Atonement");
    }
}
