//! Places within the visible map area
//!
//! A viewport is the rectangle between its southwest and northeast corners.
//! When the southwest longitude is greater than the northeast one the
//! viewport wraps past ±180°.

use crate::constants::limits::VIEWPORT_RESULTS;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::place::{Place, PlaceStore, PLACE_COLUMNS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Visible map rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub sw: Coordinates,
    pub ne: Coordinates,
}

impl Viewport {
    pub fn new(sw: Coordinates, ne: Coordinates) -> Self {
        Self { sw, ne }
    }

    /// Parse both corners from `lat,lng` strings
    pub fn parse(sw: &str, ne: &str) -> Result<Self> {
        let sw = sw
            .parse::<Coordinates>()
            .map_err(|e| Error::InvalidParameter(format!("sw: {}", detail(e))))?;
        let ne = ne
            .parse::<Coordinates>()
            .map_err(|e| Error::InvalidParameter(format!("ne: {}", detail(e))))?;
        Ok(Self::new(sw, ne))
    }

    /// Whether the viewport wraps past the antimeridian
    pub fn crosses_antimeridian(&self) -> bool {
        self.sw.lng > self.ne.lng
    }

    /// Whether a point lies inside the viewport, edges included
    #[cfg(test)]
    fn contains(&self, lat: f64, lng: f64) -> bool {
        let lat_ok = self.sw.lat <= lat && lat <= self.ne.lat;
        let lng_ok = if self.crosses_antimeridian() {
            lng >= self.sw.lng || lng <= self.ne.lng
        } else {
            self.sw.lng <= lng && lng <= self.ne.lng
        };
        lat_ok && lng_ok
    }
}

fn detail(err: Error) -> String {
    match err {
        Error::InvalidParameter(msg) => msg,
        other => other.to_string(),
    }
}

/// Up to ten distinct places inside the viewport, chosen at random
///
/// Places are distinct by (country_code, place_name, admin_code1); one row
/// is kept per triple. SQLite does the random choice so only the chosen
/// rows leave the database.
pub async fn find_places(store: &PlaceStore, viewport: &Viewport) -> Result<Vec<Place>> {
    let longitude = if viewport.crosses_antimeridian() {
        "(? <= longitude OR longitude <= ?)"
    } else {
        "(? <= longitude AND longitude <= ?)"
    };

    let sql = format!(
        "SELECT {} FROM places
         WHERE ? <= latitude AND latitude <= ? AND {}
         GROUP BY country_code, place_name, admin_code1
         ORDER BY RANDOM()
         LIMIT ?",
        PLACE_COLUMNS, longitude
    );

    let places = sqlx::query_as::<_, Place>(&sql)
        .bind(viewport.sw.lat)
        .bind(viewport.ne.lat)
        .bind(viewport.sw.lng)
        .bind(viewport.ne.lng)
        .bind(VIEWPORT_RESULTS)
        .fetch_all(store.pool())
        .await?;

    debug!("Picked {} places within {:?}", places.len(), viewport);
    Ok(places)
}
