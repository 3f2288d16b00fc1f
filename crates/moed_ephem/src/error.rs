//! Error types for ephemeris lookups.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use moed_time::TimeError;

/// Errors from an [`crate::Ephemeris`] service.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The service does not cover the requested year.
    YearOutOfRange { year: i32 },
    /// The Sun does not set within the scan window (polar day).
    NoSunset { after: DateTime<Utc> },
    /// Invalid observer parameter.
    InvalidObserver(&'static str),
    /// Iterative search did not converge.
    NoConvergence(&'static str),
    /// Epoch or ΔT conversion failed.
    Time(TimeError),
    /// Upstream service failure (remote or injected backends).
    Unavailable(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange { year } => write!(f, "year {year} is outside the ephemeris range"),
            Self::NoSunset { after } => write!(f, "no sunset found after {after}"),
            Self::InvalidObserver(msg) => write!(f, "invalid observer: {msg}"),
            Self::NoConvergence(msg) => write!(f, "no convergence: {msg}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Unavailable(msg) => write!(f, "ephemeris unavailable: {msg}"),
        }
    }
}

impl Error for EphemerisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for EphemerisError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
