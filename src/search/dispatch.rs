//! Place search dispatch
//!
//! Each query shape maps to one fixed SQL predicate. All text comparisons are
//! case-sensitive `LIKE 'value%'` prefix matches, except region codes which
//! must match exactly.

use crate::constants::limits::SEARCH_RESULTS;
use crate::error::{Error, Result};
use crate::place::{Place, PlaceStore, PLACE_COLUMNS};
use crate::search::tokenizer::{tokenize, Tokens};
use tracing::debug;

/// The recognised query shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchShape {
    /// "Cambridge, MA" or "Cambridge,Massachusetts"
    CityRegion { city: String, region: String },
    /// "Cambridge MA", "New York" or "New Hampshire"
    TwoWords {
        first: String,
        second: String,
        whole: String,
    },
    /// "New York NY" or "Concord New Hampshire"
    ThreeWords([String; 3]),
    /// "North Conway New Hampshire"
    FourWords([String; 4]),
    /// Postal code, place name or region name
    Single(String),
}

impl SearchShape {
    /// Classify a raw query
    ///
    /// Fails with `UnsupportedQueryShape` for more than four space-separated
    /// tokens. Comma queries with more than two parts use the first two.
    pub fn classify(query: &str) -> Result<Self> {
        match tokenize(query) {
            Tokens::Comma(tokens) => Ok(SearchShape::CityRegion {
                city: tokens[0].to_string(),
                region: tokens.get(1).copied().unwrap_or_default().to_string(),
            }),
            Tokens::Space(tokens) => match tokens.as_slice() {
                [first, second] => Ok(SearchShape::TwoWords {
                    first: first.to_string(),
                    second: second.to_string(),
                    whole: query.to_string(),
                }),
                [a, b, c] => Ok(SearchShape::ThreeWords([
                    a.to_string(),
                    b.to_string(),
                    c.to_string(),
                ])),
                [a, b, c, d] => Ok(SearchShape::FourWords([
                    a.to_string(),
                    b.to_string(),
                    c.to_string(),
                    d.to_string(),
                ])),
                other => Err(Error::UnsupportedQueryShape(other.len())),
            },
            Tokens::Single(token) => Ok(SearchShape::Single(token.to_string())),
        }
    }

    /// SQL predicate with positional `?` placeholders
    fn predicate(&self) -> &'static str {
        match self {
            SearchShape::CityRegion { .. } => {
                "place_name LIKE ? AND (admin_code1 = ? OR admin_name1 LIKE ?)"
            }
            SearchShape::TwoWords { .. } => {
                "(place_name LIKE ? AND (admin_code1 = ? OR admin_name1 LIKE ?)) \
                 OR place_name LIKE ? OR admin_name1 LIKE ?"
            }
            SearchShape::ThreeWords(_) => {
                "(place_name LIKE ? AND (admin_code1 = ? OR admin_name1 LIKE ?)) \
                 OR (place_name LIKE ? AND admin_name1 LIKE ?)"
            }
            SearchShape::FourWords(_) => "place_name LIKE ? AND admin_name1 LIKE ?",
            SearchShape::Single(_) => {
                "postal_code LIKE ? OR place_name LIKE ? OR admin_name1 LIKE ?"
            }
        }
    }

    /// Values for the placeholders of `predicate`, in order
    fn bindings(&self) -> Vec<String> {
        match self {
            SearchShape::CityRegion { city, region } => {
                vec![prefix(city), region.clone(), prefix(region)]
            }
            SearchShape::TwoWords {
                first,
                second,
                whole,
            } => vec![
                prefix(first),
                second.clone(),
                prefix(second),
                prefix(whole),
                prefix(whole),
            ],
            SearchShape::ThreeWords([a, b, c]) => vec![
                prefix(&format!("{} {}", a, b)),
                c.clone(),
                prefix(c),
                prefix(a),
                prefix(&format!("{} {}", b, c)),
            ],
            SearchShape::FourWords([a, b, c, d]) => vec![
                prefix(&format!("{} {}", a, b)),
                prefix(&format!("{} {}", c, d)),
            ],
            SearchShape::Single(token) => vec![prefix(token), prefix(token), prefix(token)],
        }
    }
}

fn prefix(value: &str) -> String {
    format!("{}%", value)
}

/// Find up to ten places matching a free-text query, in storage order
pub async fn search(store: &PlaceStore, query: &str) -> Result<Vec<Place>> {
    let shape = SearchShape::classify(query)?;
    debug!("Searching places for {:?} as {:?}", query, shape);

    let sql = format!(
        "SELECT {} FROM places WHERE ({}) LIMIT ?",
        PLACE_COLUMNS,
        shape.predicate()
    );

    let mut rows = sqlx::query_as::<_, Place>(&sql);
    for value in shape.bindings() {
        rows = rows.bind(value);
    }

    Ok(rows.bind(SEARCH_RESULTS).fetch_all(store.pool()).await?)
}
