//! Moon-phase descriptor from illumination percentage.
//!
//! Illumination alone cannot tell waxing from waning, so the ranges below
//! overlap and are resolved by evaluation order: the first matching check wins.
//!
//! | Check (in order) | Phase |
//! |------------------|-------|
//! | < 2 | New Moon |
//! | < 45 | Waxing Crescent |
//! | < 55 | First Quarter |
//! | < 95 | Waxing Gibbous |
//! | > 98 | Full Moon |
//! | > 55 | Waning Gibbous |
//! | > 45 | Last Quarter |
//! | otherwise | Waning Crescent |

use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Classify an illumination percentage (0-100).
    pub fn classify(illumination: f64) -> Self {
        if illumination < 2.0 {
            Self::New
        } else if illumination < 45.0 {
            Self::WaxingCrescent
        } else if illumination < 55.0 {
            Self::FirstQuarter
        } else if illumination < 95.0 {
            Self::WaxingGibbous
        } else if illumination > 98.0 {
            Self::Full
        } else if illumination > 55.0 {
            Self::WaningGibbous
        } else if illumination > 45.0 {
            Self::LastQuarter
        } else {
            Self::WaningCrescent
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::Full => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::LastQuarter => "Last Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }
}

impl Display for MoonPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
