//! ΔT (TT − UT) estimation.
//!
//! Polynomial fits by Espenak & Meeus (2006, revised 2014), valid for
//! decimal years 500..=3000. Equinox and lunation formulas produce
//! Terrestrial Time; these helpers bring them back to UT.

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, jd_to_calendar};

/// Horner evaluation, coefficients in ascending order.
fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Estimated ΔT in seconds for a decimal year.
pub fn delta_t_seconds(year: f64) -> Result<f64, TimeError> {
    if !year.is_finite() || !(500.0..=3000.0).contains(&year) {
        return Err(TimeError::DeltaTOutOfRange { year });
    }

    let dt = if year < 1600.0 {
        let u = (year - 1000.0) / 100.0;
        polynomial(
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
            u,
        )
    } else if year < 1700.0 {
        polynomial(&[120.0, -0.9808, -0.01532, 1.0 / 7129.0], year - 1600.0)
    } else if year < 1800.0 {
        polynomial(
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
            year - 1700.0,
        )
    } else if year < 1860.0 {
        polynomial(
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
            year - 1800.0,
        )
    } else if year < 1900.0 {
        polynomial(
            &[
                7.62,
                0.5737,
                -0.251754,
                0.01680668,
                -0.0004473624,
                1.0 / 233_174.0,
            ],
            year - 1860.0,
        )
    } else if year < 1920.0 {
        polynomial(
            &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197],
            year - 1900.0,
        )
    } else if year < 1941.0 {
        polynomial(&[21.20, 0.84493, -0.076100, 0.0020936], year - 1920.0)
    } else if year < 1961.0 {
        polynomial(&[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0], year - 1950.0)
    } else if year < 1986.0 {
        polynomial(&[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0], year - 1975.0)
    } else if year < 2005.0 {
        polynomial(
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
            year - 2000.0,
        )
    } else if year < 2015.0 {
        polynomial(&[64.69, 0.2930], year - 2005.0)
    } else {
        polynomial(&[67.62, 0.3645, 0.0039755], year - 2015.0)
    };

    Ok(dt)
}

/// Decimal year of a Julian Date, at month resolution (`year + (month - 0.5) / 12`).
fn decimal_year(jd: f64) -> f64 {
    let (year, month, _) = jd_to_calendar(jd);
    f64::from(year) + (f64::from(month) - 0.5) / 12.0
}

/// Convert a Julian Ephemeris Day (TT) to a Julian Date (UT).
pub fn tt_to_ut_jd(jde: f64) -> Result<f64, TimeError> {
    Ok(jde - delta_t_seconds(decimal_year(jde))? / SECONDS_PER_DAY)
}

/// Convert a Julian Date (UT) to a Julian Ephemeris Day (TT).
pub fn ut_to_tt_jd(jd: f64) -> Result<f64, TimeError> {
    Ok(jd + delta_t_seconds(decimal_year(jd))? / SECONDS_PER_DAY)
}
