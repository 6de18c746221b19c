//! Geographic coordinates
//!
//! Parsing of the `lat,lng` strings the map widget sends for viewport corners.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// `lat,lng` with optional sign and optional fractional part, nothing else
static LAT_LNG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?,-?[0-9]+(?:\.[0-9]+)?$").expect("valid lat,lng pattern")
});

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidParameter(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidParameter(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl FromStr for Coordinates {
    type Err = Error;

    /// Parse `lat,lng`, rejecting anything outside the pattern before touching
    /// the numbers, then checking ranges.
    fn from_str(s: &str) -> Result<Self> {
        if !LAT_LNG_PATTERN.is_match(s) {
            return Err(Error::InvalidParameter(format!(
                "Expected lat,lng but got {:?}",
                s
            )));
        }

        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidParameter(format!("Expected lat,lng but got {:?}", s)))?;
        let coords = Coordinates::new(parse_degrees(lat)?, parse_degrees(lng)?);
        coords.validate()?;
        Ok(coords)
    }
}

fn parse_degrees(s: &str) -> Result<f64> {
    s.parse()
        .map_err(|_| Error::InvalidParameter(format!("Invalid number: {}", s)))
}
