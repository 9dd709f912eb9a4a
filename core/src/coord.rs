use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LNG_MIN: f64 = -180.0;
pub const LNG_MAX: f64 = 180.0;

/// Fractional digits used whenever a coordinate is written back to a form field.
pub const COORD_DECIMALS: usize = 10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("coordinate is not a finite number")]
    NotFinite,
    #[error("cannot parse coordinate from '{0}'")]
    Unparsable(String),
}

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const ORIGIN: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    /// Builds a position, rejecting anything outside the valid ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordError::NotFinite);
        }
        if !(LAT_MIN..=LAT_MAX).contains(&lat) {
            return Err(CoordError::LatitudeOutOfRange(lat));
        }
        if !(LNG_MIN..=LNG_MAX).contains(&lng) {
            return Err(CoordError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Builds a position from a map event. Longitude reported on a wrapped
    /// world copy is folded back into [-180, 180); latitude is clamped.
    pub fn from_map(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordError::NotFinite);
        }
        Ok(Self {
            lat: lat.clamp(LAT_MIN, LAT_MAX),
            lng: wrap_longitude(lng),
        })
    }

    /// Parses a pair of text field values. Both must parse and be in range.
    pub fn parse_fields(lat: &str, lng: &str) -> Result<Self, CoordError> {
        let lat = parse_degrees(lat)?;
        let lng = parse_degrees(lng)?;
        Self::new(lat, lng)
    }

    pub fn formatted_lat(&self) -> String {
        format_coordinate(self.lat)
    }

    pub fn formatted_lng(&self) -> String {
        format_coordinate(self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.formatted_lat(), self.formatted_lng())
    }
}

pub fn format_coordinate(value: f64) -> String {
    format!("{value:.prec$}", prec = COORD_DECIMALS)
}

pub fn parse_degrees(raw: &str) -> Result<f64, CoordError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| CoordError::Unparsable(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(CoordError::NotFinite);
    }
    Ok(value)
}

pub fn wrap_longitude(lng: f64) -> f64 {
    if (LNG_MIN..LNG_MAX).contains(&lng) {
        return lng;
    }
    let wrapped = (lng - LNG_MIN).rem_euclid(LNG_MAX - LNG_MIN) + LNG_MIN;
    // rem_euclid can land exactly on the upper bound through rounding
    if wrapped >= LNG_MAX {
        LNG_MIN
    } else {
        wrapped
    }
}
