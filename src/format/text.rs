//! Plain text output formatter

use crate::coord::attractor::AttractorResult;
use crate::error::Result;
use crate::format::OutputFormatter;

/// Text formatter - outputs the attractor as a single `lat, lng` line
///
/// Values use `f64`'s `Display`, the shortest form that parses back to the
/// same value. Whole numbers carry no fractional part, so `40.0` prints as
/// `40`.
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Attractor as \"latitude, longitude\""
    }

    fn format(&self, result: &AttractorResult) -> Result<String> {
        Ok(format!("{}, {}", result.attractor.lat, result.attractor.lng))
    }
}
