//! Sunset computation.
//!
//! Iterative hour-angle algorithm from standard spherical astronomy: start
//! from approximate local noon, find the transit, offset by the hour angle at
//! which the Sun's upper limb reaches the depressed horizon, then refine with
//! the Sun's position at the estimated event time.

use moed_time::{
    calendar_to_jd, gmst_deg, jd_to_calendar, local_sidereal_time_deg, ut_to_tt_jd,
};

use crate::error::EphemerisError;
use crate::observer::Observer;
use crate::riseset_types::{RiseSetConfig, RiseSetResult};
use crate::sun::solar_coordinates;

/// Maximum iterations for the refinement loop.
const MAX_ITERATIONS: usize = 5;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Sidereal rotation rate in degrees per solar day.
const SIDEREAL_RATE_DEG: f64 = 360.985_647_366_29;

/// Local solar days scanned by [`next_sunset_jd`] before giving up.
const MAX_SCAN_DAYS: i32 = 370;

/// Approximate local solar noon JD from 0h UT JD and east longitude.
///
/// `JD_noon = JD_0h + 0.5 - longitude_deg / 360`
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

/// Wrap an angle in degrees to [-180, 180).
fn normalize_pm180(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Sun's right ascension and declination (degrees) at a UT Julian Date.
fn sun_ra_dec(jd_ut: f64) -> Result<(f64, f64), EphemerisError> {
    let s = solar_coordinates(ut_to_tt_jd(jd_ut)?);
    Ok((s.ra_deg, s.dec_deg))
}

/// Cosine of the hour angle at which the Sun reaches altitude `h0_deg`.
fn cos_hour_angle(h0_deg: f64, lat_deg: f64, dec_deg: f64) -> f64 {
    let (h0, phi, dec) = (
        h0_deg.to_radians(),
        lat_deg.to_radians(),
        dec_deg.to_radians(),
    );
    (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos())
}

/// Sun's local hour angle in degrees, [-180, 180).
fn local_hour_angle_deg(jd_ut: f64, longitude_deg: f64, ra_deg: f64) -> f64 {
    let lst = local_sidereal_time_deg(gmst_deg(jd_ut), longitude_deg);
    normalize_pm180(lst - ra_deg)
}

/// Compute the sunset of the local solar day containing `jd_ut_noon`.
///
/// `jd_ut_noon` is an approximate local noon; use [`approximate_local_noon_jd`].
pub fn compute_sunset(
    observer: &Observer,
    jd_ut_noon: f64,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, EphemerisError> {
    let lat = observer.latitude_deg;
    let lon = observer.longitude_deg;
    let h0 = -config.horizon_depression_deg(observer.elevation_m);

    let (ra, dec) = sun_ra_dec(jd_ut_noon)?;
    let cos_h0 = cos_hour_angle(h0, lat, dec);
    if cos_h0 > 1.0 {
        return Ok(RiseSetResult::NeverRises);
    }
    if cos_h0 < -1.0 {
        return Ok(RiseSetResult::NeverSets);
    }

    // Transit: correct noon by the hour angle it still carries
    let ha_noon = local_hour_angle_deg(jd_ut_noon, lon, ra);
    let jd_transit = jd_ut_noon - ha_noon / SIDEREAL_RATE_DEG;
    let mut jd_event = jd_transit + cos_h0.acos().to_degrees() / SIDEREAL_RATE_DEG;

    for _ in 0..MAX_ITERATIONS {
        let (ra_i, dec_i) = sun_ra_dec(jd_event)?;
        let cos_h = cos_hour_angle(h0, lat, dec_i);
        if cos_h > 1.0 {
            return Ok(RiseSetResult::NeverRises);
        }
        if cos_h < -1.0 {
            return Ok(RiseSetResult::NeverSets);
        }
        let ha_target = cos_h.acos().to_degrees();
        let ha_actual = local_hour_angle_deg(jd_event, lon, ra_i);

        let correction = normalize_pm180(ha_target - ha_actual) / SIDEREAL_RATE_DEG;
        jd_event += correction;

        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    Ok(RiseSetResult::Event { jd_ut: jd_event })
}

/// Julian Date (UT) of the first sunset at or after `jd_ut`.
///
/// Starts one local day early: for western longitudes the previous local
/// day's sunset falls after 0h UT of the current UTC date.
pub fn next_sunset_jd(
    observer: &Observer,
    jd_ut: f64,
    config: &RiseSetConfig,
) -> Result<Option<f64>, EphemerisError> {
    let (year, month, day) = jd_to_calendar(jd_ut);
    let jd_midnight = calendar_to_jd(year, month, day.floor());

    for offset in -1..MAX_SCAN_DAYS {
        let noon = approximate_local_noon_jd(jd_midnight + f64::from(offset), observer.longitude_deg);
        if let RiseSetResult::Event { jd_ut: event } = compute_sunset(observer, noon, config)? {
            if event >= jd_ut {
                return Ok(Some(event));
            }
        }
    }
    Ok(None)
}
