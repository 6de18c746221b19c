//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::place::Place;

/// Text formatter - one place per line
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "One place per line"
    }

    fn format(&self, places: &[Place]) -> Result<String> {
        if places.is_empty() {
            return Ok("No places found\n".to_string());
        }

        let mut output = String::new();
        for place in places {
            let region = place
                .admin_code1
                .as_deref()
                .or(place.admin_name1.as_deref())
                .unwrap_or("-");
            output.push_str(&format!(
                "{}, {} {} {} ({:.4}, {:.4})\n",
                place.place_name,
                region,
                place.postal_code,
                place.country_code,
                place.latitude,
                place.longitude
            ));
        }

        Ok(output)
    }
}
