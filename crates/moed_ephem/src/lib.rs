//! Astronomical event services for the moed calendar engine.
//!
//! This crate provides:
//! - The [`Ephemeris`] capability trait (equinox, new moon, illumination, sunset)
//! - [`Observer`], the fixed geographic location sunsets are computed for
//! - [`AnalyticEphemeris`], a self-contained implementation built from the
//!   closed-form series in Meeus, *Astronomical Algorithms*
//!
//! All instants crossing the trait boundary are `DateTime<Utc>`; Julian Dates
//! and Terrestrial Time stay internal.

pub mod analytic;
pub mod equinox;
pub mod error;
pub mod illumination;
pub mod lunation;
pub mod observer;
pub mod riseset;
pub mod riseset_types;
pub mod service;
pub mod sun;

pub use analytic::AnalyticEphemeris;
pub use equinox::{MAX_YEAR, MIN_YEAR, march_equinox_jde};
pub use error::EphemerisError;
pub use illumination::{moon_illuminated_percent, moon_phase_angle_deg};
pub use lunation::{new_moon_jde, next_new_moon_jd};
pub use observer::Observer;
pub use riseset::{approximate_local_noon_jd, compute_sunset, next_sunset_jd};
pub use riseset_types::{RiseSetConfig, RiseSetResult};
pub use service::Ephemeris;
pub use sun::{SolarCoords, solar_coordinates};
