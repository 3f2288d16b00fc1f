//! Configuration for the moed calendar host.
//!
//! ```toml
//! [observer]
//! name = "Jerusalem"
//! latitude_deg = 31.7683
//! longitude_deg = 35.2137
//! elevation_m = 754.0
//! time_zone = "Asia/Jerusalem"
//!
//! [sunset]
//! refraction_arcmin = 34.0
//! semidiameter_arcmin = 16.0
//! altitude_correction = true
//! ```
//!
//! Every section and key is optional; omitted values take the defaults above.

pub mod error;

use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use moed_ephem::{AnalyticEphemeris, Observer, RiseSetConfig};
use serde::Deserialize;
use tracing::debug;

pub use error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoedConfig {
    /// Location sunsets are computed for.
    #[serde(default)]
    pub observer: ObserverToml,

    /// Sunset horizon parameters.
    #[serde(default)]
    pub sunset: SunsetToml,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObserverToml {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_latitude")]
    pub latitude_deg: f64,
    #[serde(default = "default_longitude")]
    pub longitude_deg: f64,
    #[serde(default = "default_elevation")]
    pub elevation_m: f64,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for ObserverToml {
    fn default() -> Self {
        Self {
            name: default_name(),
            latitude_deg: default_latitude(),
            longitude_deg: default_longitude(),
            elevation_m: default_elevation(),
            time_zone: default_time_zone(),
        }
    }
}

fn default_name() -> String {
    "Jerusalem".to_string()
}
fn default_latitude() -> f64 {
    31.7683
}
fn default_longitude() -> f64 {
    35.2137
}
fn default_elevation() -> f64 {
    754.0
}
fn default_time_zone() -> String {
    "Asia/Jerusalem".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SunsetToml {
    #[serde(default = "default_refraction")]
    pub refraction_arcmin: f64,
    #[serde(default = "default_semidiameter")]
    pub semidiameter_arcmin: f64,
    #[serde(default = "default_true")]
    pub altitude_correction: bool,
}

impl Default for SunsetToml {
    fn default() -> Self {
        Self {
            refraction_arcmin: default_refraction(),
            semidiameter_arcmin: default_semidiameter(),
            altitude_correction: true,
        }
    }
}

fn default_refraction() -> f64 {
    34.0
}
fn default_semidiameter() -> f64 {
    16.0
}
fn default_true() -> bool {
    true
}

impl MoedConfig {
    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::parse(&text)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Validated observer with its time zone resolved.
    pub fn observer(&self) -> Result<Observer, ConfigError> {
        let o = &self.observer;
        let time_zone = parse_time_zone(&o.time_zone)?;
        Observer::new(
            o.name.clone(),
            o.latitude_deg,
            o.longitude_deg,
            o.elevation_m,
            time_zone,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Sunset parameters. Angles must be finite and non-negative.
    pub fn rise_set(&self) -> Result<RiseSetConfig, ConfigError> {
        let s = &self.sunset;
        for (key, value) in [
            ("refraction_arcmin", s.refraction_arcmin),
            ("semidiameter_arcmin", s.semidiameter_arcmin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sunset.{key} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(RiseSetConfig {
            refraction_arcmin: s.refraction_arcmin,
            semidiameter_arcmin: s.semidiameter_arcmin,
            altitude_correction: s.altitude_correction,
        })
    }

    /// The analytic ephemeris configured with [`Self::rise_set`].
    pub fn ephemeris(&self) -> Result<AnalyticEphemeris, ConfigError> {
        Ok(AnalyticEphemeris::new(self.rise_set()?))
    }
}

impl FromStr for MoedConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Resolve an IANA zone name such as `"America/New_York"`.
pub fn parse_time_zone(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimeZone(name.to_string()))
}
