//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::Place;

/// JSON formatter - the same array the HTTP endpoints return, pretty-printed
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array of place objects"
    }

    fn format(&self, places: &[Place]) -> Result<String> {
        Ok(serde_json::to_string_pretty(places)?)
    }
}
