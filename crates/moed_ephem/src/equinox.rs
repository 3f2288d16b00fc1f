//! March equinox instants.
//!
//! Meeus, *Astronomical Algorithms*, ch. 27: a mean-equinox polynomial in
//! millennia, corrected by 24 periodic terms. Accuracy is about a minute
//! for the covered years, well inside what a calendar date needs.

use moed_time::{jd_to_centuries, tt_to_ut_jd};

use crate::error::EphemerisError;

/// First year covered (bounded below by the ΔT model).
pub const MIN_YEAR: i32 = 500;

/// Last year covered (bounded above by Meeus Table 27.B).
pub const MAX_YEAR: i32 = 3000;

/// Table 27.C: amplitude (1e-5 day), phase (deg), rate (deg / century).
const PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1934.136),
    (203.0, 337.23, 32964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445267.112),
    (156.0, 73.14, 45036.886),
    (136.0, 171.52, 22518.443),
    (77.0, 222.54, 65928.934),
    (74.0, 296.72, 3034.906),
    (70.0, 243.58, 9037.513),
    (58.0, 119.81, 33718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2281.226),
    (45.0, 247.54, 29929.562),
    (44.0, 325.15, 31555.956),
    (29.0, 60.93, 4443.417),
    (18.0, 155.12, 67555.328),
    (17.0, 288.79, 4562.452),
    (16.0, 198.04, 62894.029),
    (14.0, 199.76, 31436.921),
    (12.0, 95.39, 14577.848),
    (12.0, 287.11, 31931.756),
    (12.0, 320.81, 34777.259),
    (9.0, 227.73, 1222.114),
    (8.0, 15.45, 16859.074),
];

/// Mean March equinox JDE (Tables 27.A / 27.B).
fn mean_march_equinox_jde(year: i32) -> f64 {
    if year < 1000 {
        let y = f64::from(year) / 1000.0;
        1_721_139.291_89 + 365_242.137_40 * y + 0.061_34 * y * y + 0.001_11 * y.powi(3)
            - 0.000_71 * y.powi(4)
    } else {
        let y = f64::from(year - 2000) / 1000.0;
        2_451_623.809_84 + 365_242.374_04 * y + 0.051_69 * y * y
            - 0.004_11 * y.powi(3)
            - 0.000_57 * y.powi(4)
    }
}

/// March equinox of `year` as a Julian Ephemeris Day (TT).
pub fn march_equinox_jde(year: i32) -> Result<f64, EphemerisError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(EphemerisError::YearOutOfRange { year });
    }
    let jde0 = mean_march_equinox_jde(year);
    let t = jd_to_centuries(jde0);
    let w = (35_999.373 * t - 2.47).to_radians();
    let dl = 1.0 + 0.0334 * w.cos() + 0.0007 * (2.0 * w).cos();
    let s: f64 = PERIODIC_TERMS
        .iter()
        .map(|&(a, b, c)| a * (b + c * t).to_radians().cos())
        .sum();
    Ok(jde0 + 0.000_01 * s / dl)
}

/// March equinox of `year` as a Julian Date (UT).
pub(crate) fn march_equinox_jd_ut(year: i32) -> Result<f64, EphemerisError> {
    Ok(tt_to_ut_jd(march_equinox_jde(year)?)?)
}
