//! The ephemeris capability consumed by the calendar engine.

use chrono::{DateTime, Utc};

use crate::error::EphemerisError;
use crate::observer::Observer;

/// Astronomical events the calendar engine needs, and nothing more.
///
/// Implementations must be deterministic for identical inputs. Use
/// [`crate::AnalyticEphemeris`] for real dates, or a synthetic impl in tests.
pub trait Ephemeris {
    /// The March (northern spring) equinox falling in `year`.
    fn next_spring_equinox(&self, year: i32) -> Result<DateTime<Utc>, EphemerisError>;

    /// The first new moon at or after `from`.
    fn next_new_moon(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>, EphemerisError>;

    /// Illuminated percentage of the Moon's disk at `at`, in [0, 100].
    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError>;

    /// The first sunset at or after `from` for `observer`.
    fn next_sunset(
        &self,
        from: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<DateTime<Utc>, EphemerisError>;
}

impl<T: Ephemeris + ?Sized> Ephemeris for &T {
    fn next_spring_equinox(&self, year: i32) -> Result<DateTime<Utc>, EphemerisError> {
        (**self).next_spring_equinox(year)
    }

    fn next_new_moon(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>, EphemerisError> {
        (**self).next_new_moon(from)
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        (**self).moon_illumination(at)
    }

    fn next_sunset(
        &self,
        from: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<DateTime<Utc>, EphemerisError> {
        (**self).next_sunset(from, observer)
    }
}
