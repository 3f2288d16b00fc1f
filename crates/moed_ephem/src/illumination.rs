//! Illuminated fraction of the Moon's disk.
//!
//! Meeus, *Astronomical Algorithms*, ch. 48, using the eq. 48.4 phase angle
//! from the ch. 47 fundamental arguments. Good to about 0.5 percentage
//! points, which is ample for a named-phase classification.

use moed_time::jd_to_centuries;

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

/// Phase angle `i` of the Moon in degrees at a Julian Ephemeris Day.
pub fn moon_phase_angle_deg(jde: f64) -> f64 {
    let t = jd_to_centuries(jde);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    // Mean elongation, Sun's mean anomaly, Moon's mean anomaly
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;

    let i = 180.0 - d - 6.289 * sin_deg(mp) + 2.100 * sin_deg(m)
        - 1.274 * sin_deg(2.0 * d - mp)
        - 0.658 * sin_deg(2.0 * d)
        - 0.214 * sin_deg(2.0 * mp)
        - 0.110 * sin_deg(d);
    i.rem_euclid(360.0)
}

/// Illuminated percentage of the Moon's disk, [0, 100].
pub fn moon_illuminated_percent(jde: f64) -> f64 {
    let i = moon_phase_angle_deg(jde).to_radians();
    (50.0 * (1.0 + i.cos())).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moed_time::calendar_to_jd;

    #[test]
    fn full_moon_jan_2024() {
        // Full moon 2024 Jan 25 17:54 UTC
        let jd = calendar_to_jd(2024, 1, 25.0 + 17.9 / 24.0);
        let k = moon_illuminated_percent(jd);
        assert!(k > 99.0, "got {k}");
    }

    #[test]
    fn new_moon_jan_2024() {
        // New moon 2024 Jan 11 11:57 UTC
        let jd = calendar_to_jd(2024, 1, 11.0 + 11.95 / 24.0);
        let k = moon_illuminated_percent(jd);
        assert!(k < 1.0, "got {k}");
    }

    #[test]
    fn first_quarter_jan_2024() {
        // First quarter 2024 Jan 18 03:53 UTC
        let jd = calendar_to_jd(2024, 1, 18.0 + 3.88 / 24.0);
        let k = moon_illuminated_percent(jd);
        assert!((k - 50.0).abs() < 3.0, "got {k}");
    }

    #[test]
    fn range_over_a_month() {
        let start = calendar_to_jd(2025, 6, 1.0);
        for step in 0..60 {
            let k = moon_illuminated_percent(start + step as f64 * 0.5);
            assert!((0.0..=100.0).contains(&k), "out of range: {k}");
        }
    }
}
