//! Time scales and epoch conversions for the moed calendar engine.
//!
//! This crate provides:
//! - Julian Date ↔ proleptic Gregorian calendar conversions
//! - Julian Date ↔ `chrono::DateTime<Utc>` conversions
//! - ΔT (TT − UT) estimation for converting dynamical-time results to UTC
//! - Greenwich and local mean sidereal time

pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use delta_t::{delta_t_seconds, tt_to_ut_jd, ut_to_tt_jd};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_from_utc,
    jd_to_calendar, jd_to_centuries, utc_from_jd,
};
pub use sidereal::{gmst_deg, local_sidereal_time_deg};
