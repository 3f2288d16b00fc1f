//! Lunisolar anchor-and-offset observance calendar.
//!
//! For a solar year the engine resolves two anchors, Day 1 of the spring
//! lunisolar month (Anchor A) and of the autumn month (Anchor B), from an
//! injected [`moed_ephem::Ephemeris`], then places eight annual observances
//! at fixed or weekday-resolved offsets from them:
//!
//! - [`anchor`]: equinox-bounded new-moon search
//! - [`observance`]: offset rules, annotation with sunset and moon phase
//! - [`moon_phase`]: illumination to phase descriptor
//! - [`format`]: display records, Markdown, text, and JSON rendering

pub mod anchor;
pub mod error;
pub mod format;
pub mod moon_phase;
pub mod observance;
pub mod observance_types;

pub use anchor::{
    AUTUMN_SEARCH_DAYS, Anchor, Anchors, DAY_FOURTEEN_OFFSET, EQUINOX_MARGIN_DAYS,
    MAX_SPRING_ITERATIONS, resolve_anchors, resolve_autumn_anchor, resolve_spring_anchor,
};
pub use error::{CalculationError, CalendarError, ParseObservanceError};
pub use format::{ObservanceDisplay, render_json, render_json_years, render_report, render_text};
pub use moon_phase::MoonPhase;
pub use observance::{
    compute_observances, compute_observances_for_years, days_to_following_sunday, derive_dates,
    derive_observances, local_midnight, resolve_offset, select, weekday_name,
};
pub use observance_types::{
    ALL_OBSERVANCES, CycleAnchor, LunisolarLabel, OBSERVANCES, ObservanceDate,
    ObservanceDefinition, ObservanceKind, ObservanceRecord, OffsetRule, PENTECOST_COUNT_DAYS,
};
