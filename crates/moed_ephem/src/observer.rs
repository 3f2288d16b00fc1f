//! Geographic observer for sunset and local-time rendering.

use chrono_tz::Tz;

use crate::error::EphemerisError;

/// Fixed observing location: coordinates plus the civil time zone that
/// local sunset times are rendered in.
#[derive(Debug, Clone, PartialEq)]
pub struct Observer {
    /// Display label, e.g. "Jerusalem".
    pub name: String,
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Elevation above mean sea level in meters.
    pub elevation_m: f64,
    /// IANA civil time zone.
    pub time_zone: Tz,
}

impl Observer {
    /// Create a validated observer.
    pub fn new(
        name: impl Into<String>,
        latitude_deg: f64,
        longitude_deg: f64,
        elevation_m: f64,
        time_zone: Tz,
    ) -> Result<Self, EphemerisError> {
        let observer = Self {
            name: name.into(),
            latitude_deg,
            longitude_deg,
            elevation_m,
            time_zone,
        };
        observer.validate()?;
        Ok(observer)
    }

    /// Jerusalem, the reference location for the observance calendar.
    pub fn jerusalem() -> Self {
        Self {
            name: "Jerusalem".to_string(),
            latitude_deg: 31.7683,
            longitude_deg: 35.2137,
            elevation_m: 754.0,
            time_zone: Tz::Asia__Jerusalem,
        }
    }

    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(EphemerisError::InvalidObserver(
                "latitude must be within [-90, 90] degrees",
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(EphemerisError::InvalidObserver(
                "longitude must be within [-180, 180] degrees",
            ));
        }
        if !self.elevation_m.is_finite() {
            return Err(EphemerisError::InvalidObserver("elevation must be finite"));
        }
        Ok(())
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::jerusalem()
    }
}
