//! New-moon instants.
//!
//! Meeus, *Astronomical Algorithms*, ch. 49: mean phase for lunation number
//! `k` (k = 0 is the new moon of 2000 Jan 6), 25 periodic corrections in the
//! Sun's and Moon's anomalies and the Moon's argument of latitude, and 14
//! planetary terms. Typical error is well under a minute.

use moed_time::{J2000_JD, tt_to_ut_jd};

use crate::error::EphemerisError;

/// Lunations per tropical year.
const LUNATIONS_PER_YEAR: f64 = 12.3685;

/// Steps allowed when walking `k` forward from the initial estimate.
const MAX_LUNATION_STEPS: usize = 8;

/// Planetary arguments A1..A14: (phase deg, rate deg / lunation, amplitude day).
/// A1 also carries a −0.009173·T² term handled separately.
const PLANETARY_TERMS: [(f64, f64, f64); 14] = [
    (299.77, 0.107_408, 0.000_325),
    (251.88, 0.016_321, 0.000_165),
    (251.83, 26.651_886, 0.000_164),
    (349.42, 36.412_478, 0.000_126),
    (84.66, 18.206_239, 0.000_110),
    (141.74, 53.303_771, 0.000_062),
    (207.14, 2.453_732, 0.000_060),
    (154.84, 7.306_860, 0.000_056),
    (34.52, 27.261_239, 0.000_047),
    (207.19, 0.121_824, 0.000_042),
    (291.34, 1.844_379, 0.000_040),
    (161.72, 24.198_154, 0.000_037),
    (239.56, 25.513_099, 0.000_035),
    (331.55, 3.592_518, 0.000_023),
];

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

/// True new moon for integer lunation `k`, as a Julian Ephemeris Day (TT).
pub fn new_moon_jde(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = 2_451_550.097_66 + 29.530_588_861 * k + 0.000_154_37 * t2 - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    // Eccentricity factor of Earth's orbit
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = 2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3;
    let mp = 201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4;
    let f = 160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4;
    let om = 124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3;

    let periodic = -0.407_20 * sin_deg(mp)
        + 0.172_41 * e * sin_deg(m)
        + 0.016_08 * sin_deg(2.0 * mp)
        + 0.010_39 * sin_deg(2.0 * f)
        + 0.007_39 * e * sin_deg(mp - m)
        - 0.005_14 * e * sin_deg(mp + m)
        + 0.002_08 * e * e * sin_deg(2.0 * m)
        - 0.001_11 * sin_deg(mp - 2.0 * f)
        - 0.000_57 * sin_deg(mp + 2.0 * f)
        + 0.000_56 * e * sin_deg(2.0 * mp + m)
        - 0.000_42 * sin_deg(3.0 * mp)
        + 0.000_42 * e * sin_deg(m + 2.0 * f)
        + 0.000_38 * e * sin_deg(m - 2.0 * f)
        - 0.000_24 * e * sin_deg(2.0 * mp - m)
        - 0.000_17 * sin_deg(om)
        - 0.000_07 * sin_deg(mp + 2.0 * m)
        + 0.000_04 * sin_deg(2.0 * mp - 2.0 * f)
        + 0.000_04 * sin_deg(3.0 * m)
        + 0.000_03 * sin_deg(mp + m - 2.0 * f)
        + 0.000_03 * sin_deg(2.0 * mp + 2.0 * f)
        - 0.000_03 * sin_deg(mp + m + 2.0 * f)
        + 0.000_03 * sin_deg(mp - m + 2.0 * f)
        - 0.000_02 * sin_deg(mp - m - 2.0 * f)
        - 0.000_02 * sin_deg(3.0 * mp + m)
        + 0.000_02 * sin_deg(4.0 * mp);

    let planetary: f64 = PLANETARY_TERMS
        .iter()
        .enumerate()
        .map(|(i, &(phase, rate, amp))| {
            let extra = if i == 0 { -0.009_173 * t2 } else { 0.0 };
            amp * sin_deg(phase + rate * k + extra)
        })
        .sum();

    mean + periodic + planetary
}

/// Julian Date (UT) of the first new moon at or after `jd_ut`.
pub fn next_new_moon_jd(jd_ut: f64) -> Result<f64, EphemerisError> {
    let years_since_2000 = (jd_ut - J2000_JD) / 365.25;
    // One lunation of slack so the walk always starts before the target
    let mut k = (years_since_2000 * LUNATIONS_PER_YEAR).floor() as i64 - 1;

    for _ in 0..MAX_LUNATION_STEPS {
        let jd = tt_to_ut_jd(new_moon_jde(k))?;
        if jd >= jd_ut {
            return Ok(jd);
        }
        k += 1;
    }
    Err(EphemerisError::NoConvergence(
        "new moon walk exceeded lunation step limit",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_49a() {
        // New moon of 1977 Feb: k = -283, JDE 2443192.65118
        let jde = new_moon_jde(-283);
        assert!((jde - 2_443_192.651_18).abs() < 1e-4, "got {jde}");
    }

    #[test]
    fn k_zero_is_january_2000() {
        // 2000 Jan 6 ~18:14 UT
        let jde = new_moon_jde(0);
        assert!((jde - 2_451_550.26).abs() < 0.01, "got {jde}");
    }

    #[test]
    fn next_is_at_or_after() {
        let from = 2_460_310.5; // 2024 Jan 1
        let nm = next_new_moon_jd(from).unwrap();
        assert!(nm >= from);
        assert!(nm - from < 29.6, "skipped a lunation: {}", nm - from);
    }

    #[test]
    fn exact_instant_is_returned() {
        let nm = next_new_moon_jd(2_460_310.5).unwrap();
        let again = next_new_moon_jd(nm).unwrap();
        assert!((again - nm).abs() < 1e-9, "at-or-after must include the instant");
    }

    #[test]
    fn consecutive_spacing() {
        let a = next_new_moon_jd(2_460_310.5).unwrap();
        let b = next_new_moon_jd(a + 1.0).unwrap();
        let gap = b - a;
        assert!((29.2..29.9).contains(&gap), "gap = {gap}");
    }
}
