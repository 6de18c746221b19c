//! GeoNames postal-code import
//!
//! Reads the tab-separated dumps published at download.geonames.org/export/zip
//! (country code, postal code, place name, admin name1, admin code1,
//! admin name2, admin code2, admin name3, admin code3, latitude, longitude,
//! accuracy) into the `places` table.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::place::{Place, PlaceStore};
use std::fs;
use std::path::Path;
use tracing::info;

/// Fields up to and including longitude
const MIN_FIELDS: usize = 11;

/// Parse one line of a dump
///
/// `line_no` is 1-based and only used in error messages. Blank lines yield
/// `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Place>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return Err(Error::Import(format!(
            "line {}: expected at least {} tab-separated fields, found {}",
            line_no,
            MIN_FIELDS,
            fields.len()
        )));
    }

    let number = |idx: usize, what: &str| -> Result<f64> {
        fields[idx].trim().parse().map_err(|_| {
            Error::Import(format!("line {}: invalid {} {:?}", line_no, what, fields[idx]))
        })
    };

    let position = Coordinates::new(number(9, "latitude")?, number(10, "longitude")?);
    position.validate().map_err(|e| match e {
        Error::InvalidParameter(msg) => Error::Import(format!("line {}: {}", line_no, msg)),
        other => other,
    })?;

    Ok(Some(Place {
        country_code: fields[0].to_string(),
        postal_code: fields[1].to_string(),
        place_name: fields[2].to_string(),
        admin_name1: non_empty(fields[3]),
        admin_code1: non_empty(fields[4]),
        latitude: position.lat,
        longitude: position.lng,
    }))
}

fn non_empty(field: &str) -> Option<String> {
    (!field.is_empty()).then(|| field.to_string())
}

/// Parse a whole dump
pub fn parse(content: &str) -> Result<Vec<Place>> {
    let mut places = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if let Some(place) = parse_line(idx + 1, line)? {
            places.push(place);
        }
    }
    Ok(places)
}

/// Read a dump from disk
pub fn read_file(path: &Path) -> Result<Vec<Place>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Import(format!("Failed to read {}: {}", path.display(), e)))?;
    parse(&content)
}

/// Import a dump into the store, returning the number of rows written
pub async fn import_file(store: &PlaceStore, path: &Path) -> Result<usize> {
    let places = read_file(path)?;
    info!("Importing {} places from {}", places.len(), path.display());
    store.insert(&places).await?;
    Ok(places.len())
}
