//! Error types for observance computation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use moed_ephem::EphemerisError;

/// An internal invariant of the anchor or observance derivation was violated.
///
/// These are defect signals; a correct ephemeris never produces them.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalculationError {
    /// The spring anchor search did not settle within its iteration bound.
    SearchExhausted { year: i32, iterations: usize },
    /// The spring anchor's 14th day precedes the equinox.
    EquinoxBound {
        year: i32,
        anchor: NaiveDate,
        equinox: DateTime<Utc>,
    },
    /// Two observances of one cycle are out of order or overlap.
    Overlap {
        year: i32,
        earlier: &'static str,
        later: &'static str,
    },
    /// Date arithmetic left the representable calendar range.
    DateOverflow { year: i32 },
}

impl Display for CalculationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SearchExhausted { year, iterations } => write!(
                f,
                "spring anchor search for {year} did not settle after {iterations} new moons"
            ),
            Self::EquinoxBound {
                year,
                anchor,
                equinox,
            } => write!(
                f,
                "spring anchor {anchor} for {year} puts day 14 before the equinox at {equinox}"
            ),
            Self::Overlap {
                year,
                earlier,
                later,
            } => write!(f, "{earlier} overlaps {later} in {year}"),
            Self::DateOverflow { year } => write!(f, "date arithmetic overflow in {year}"),
        }
    }
}

impl Error for CalculationError {}

/// Errors from [`crate::compute_observances`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalendarError {
    /// The ephemeris could not supply a required instant.
    AstronomicalLookup { year: i32, source: EphemerisError },
    /// An internal invariant was violated.
    Calculation(CalculationError),
}

impl CalendarError {
    /// The year whose computation failed.
    pub fn year(&self) -> i32 {
        match self {
            Self::AstronomicalLookup { year, .. } => *year,
            Self::Calculation(e) => match e {
                CalculationError::SearchExhausted { year, .. }
                | CalculationError::EquinoxBound { year, .. }
                | CalculationError::Overlap { year, .. }
                | CalculationError::DateOverflow { year } => *year,
            },
        }
    }
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AstronomicalLookup { year, source } => {
                write!(f, "unable to compute observances for year {year}: {source}")
            }
            Self::Calculation(e) => write!(f, "calculation error: {e}"),
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AstronomicalLookup { source, .. } => Some(source),
            Self::Calculation(e) => Some(e),
        }
    }
}

impl From<CalculationError> for CalendarError {
    fn from(e: CalculationError) -> Self {
        Self::Calculation(e)
    }
}

/// An observance name that matches no table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseObservanceError(pub String);

impl Display for ParseObservanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown observance: {:?}", self.0)
    }
}

impl Error for ParseObservanceError {}

/// Attach the year to an ephemeris failure.
pub(crate) fn lookup<T>(year: i32, result: Result<T, EphemerisError>) -> Result<T, CalendarError> {
    result.map_err(|source| CalendarError::AstronomicalLookup { year, source })
}
