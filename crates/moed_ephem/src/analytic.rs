//! Closed-form ephemeris service.

use chrono::{DateTime, Utc};
use tracing::trace;

use moed_time::{jd_from_utc, ut_to_tt_jd, utc_from_jd};

use crate::equinox::march_equinox_jd_ut;
use crate::error::EphemerisError;
use crate::illumination::moon_illuminated_percent;
use crate::lunation::next_new_moon_jd;
use crate::observer::Observer;
use crate::riseset::next_sunset_jd;
use crate::riseset_types::RiseSetConfig;
use crate::service::Ephemeris;

/// Search slack covering millisecond rounding of `DateTime<Utc>` (~0.86 ms).
/// A returned event instant passed back in yields the same event.
const ROUNDING_SLACK_DAYS: f64 = 1.0e-8;

/// [`Ephemeris`] backed by Meeus series; stateless and thread-safe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalyticEphemeris {
    rise_set: RiseSetConfig,
}

impl AnalyticEphemeris {
    pub fn new(rise_set: RiseSetConfig) -> Self {
        Self { rise_set }
    }

    pub fn rise_set_config(&self) -> &RiseSetConfig {
        &self.rise_set
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn next_spring_equinox(&self, year: i32) -> Result<DateTime<Utc>, EphemerisError> {
        let jd = march_equinox_jd_ut(year)?;
        let instant = utc_from_jd(jd)?;
        trace!(year, %instant, "march equinox");
        Ok(instant)
    }

    fn next_new_moon(&self, from: DateTime<Utc>) -> Result<DateTime<Utc>, EphemerisError> {
        let jd = next_new_moon_jd(jd_from_utc(&from) - ROUNDING_SLACK_DAYS)?;
        let instant = utc_from_jd(jd)?.max(from);
        trace!(%from, %instant, "next new moon");
        Ok(instant)
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let jde = ut_to_tt_jd(jd_from_utc(&at))?;
        Ok(moon_illuminated_percent(jde))
    }

    fn next_sunset(
        &self,
        from: DateTime<Utc>,
        observer: &Observer,
    ) -> Result<DateTime<Utc>, EphemerisError> {
        observer.validate()?;
        let from_jd = jd_from_utc(&from) - ROUNDING_SLACK_DAYS;
        let jd = next_sunset_jd(observer, from_jd, &self.rise_set)?
            .ok_or(EphemerisError::NoSunset { after: from })?;
        let instant = utc_from_jd(jd)?.max(from);
        trace!(%from, %instant, place = %observer.name, "next sunset");
        Ok(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn equinox_out_of_range_is_error() {
        let eph = AnalyticEphemeris::default();
        assert_eq!(
            eph.next_spring_equinox(3500),
            Err(EphemerisError::YearOutOfRange { year: 3500 })
        );
    }

    #[test]
    fn new_moon_never_precedes_search_instant() {
        let eph = AnalyticEphemeris::default();
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let nm = eph.next_new_moon(from).unwrap();
        assert!(nm >= from);
        assert_eq!(eph.next_new_moon(nm).unwrap(), nm);
    }

    #[test]
    fn invalid_observer_rejected() {
        let eph = AnalyticEphemeris::default();
        let mut obs = Observer::jerusalem();
        obs.latitude_deg = 120.0;
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            eph.next_sunset(from, &obs),
            Err(EphemerisError::InvalidObserver(_))
        ));
    }
}
