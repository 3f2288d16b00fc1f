//! Greenwich and local mean sidereal time.
//!
//! Source: Meeus, *Astronomical Algorithms*, eq. 12.4. UT is taken as UTC;
//! the sub-second UT1 − UTC difference is below the resolution the
//! sunset search reports.

use crate::julian::{J2000_JD, jd_to_centuries};

/// Greenwich mean sidereal time in degrees, [0, 360).
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = jd_to_centuries(jd_ut);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD)
        + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    theta.rem_euclid(360.0)
}

/// Local mean sidereal time in degrees for an east-positive longitude, [0, 360).
pub fn local_sidereal_time_deg(gmst: f64, longitude_east_deg: f64) -> f64 {
    (gmst + longitude_east_deg).rem_euclid(360.0)
}
