//! Apparent solar coordinates, low precision.
//!
//! Meeus, *Astronomical Algorithms*, ch. 25 (geometric longitude from the
//! equation of center, corrected for nutation and aberration). Accurate to
//! about 0.01°, i.e. a few seconds of sunset time.

use moed_time::jd_to_centuries;

/// Apparent geocentric equatorial position of the Sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCoords {
    /// Right ascension in degrees, [0, 360).
    pub ra_deg: f64,
    /// Declination in degrees.
    pub dec_deg: f64,
    /// Earth-Sun distance in AU.
    pub distance_au: f64,
}

/// Apparent solar coordinates at a Julian Ephemeris Day.
pub fn solar_coordinates(jde: f64) -> SolarCoords {
    let t = jd_to_centuries(jde);
    let t2 = t * t;

    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t2;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t2).to_radians();
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t2;

    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t2) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let true_lon = l0 + c;
    let anomaly = m + c.to_radians();
    let distance_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * anomaly.cos());

    let omega = (125.04 - 1934.136 * t).to_radians();
    let lambda = (true_lon - 0.005_69 - 0.004_78 * omega.sin()).to_radians();

    let eps0 = 23.0 + 26.0 / 60.0 + 21.448 / 3600.0
        - (46.8150 * t + 0.000_59 * t2 - 0.001_813 * t2 * t) / 3600.0;
    let eps = (eps0 + 0.002_56 * omega.cos()).to_radians();

    let ra = (eps.cos() * lambda.sin()).atan2(lambda.cos());
    let dec = (eps.sin() * lambda.sin()).asin();

    SolarCoords {
        ra_deg: ra.to_degrees().rem_euclid(360.0),
        dec_deg: dec.to_degrees(),
        distance_au,
    }
}
