//! Error types for time-scale conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from epoch conversion or ΔT lookup.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Julian Date cannot be represented as a UTC instant.
    InstantOutOfRange { jd: f64 },
    /// No ΔT model covers the requested decimal year.
    DeltaTOutOfRange { year: f64 },
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InstantOutOfRange { jd } => {
                write!(f, "JD {jd} is outside the representable UTC range")
            }
            Self::DeltaTOutOfRange { year } => {
                write!(f, "no Delta T estimate for year {year:.2} (supported: 500-3000)")
            }
        }
    }
}

impl Error for TimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_delta_t_range() {
        let e = TimeError::DeltaTOutOfRange { year: 3100.0 };
        assert_eq!(
            e.to_string(),
            "no Delta T estimate for year 3100.00 (supported: 500-3000)"
        );
    }

    #[test]
    fn is_send_sync() {
        fn assert_impl<T: Send + Sync + Error>() {}
        assert_impl::<TimeError>();
    }
}
