//! JSON output formatter

use crate::coord::attractor::AttractorResult;
use crate::error::Result;
use crate::format::OutputFormatter;

/// JSON formatter - outputs the full result as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON result"
    }

    fn format(&self, result: &AttractorResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_result;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.format(&sample_result()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["attractor"]["lat"], 40.000123);
        assert_eq!(parsed["request"]["num_points"], 1024);
        assert_eq!(parsed["backend"], "pseudo");
        assert_eq!(parsed["grid_node"][0], 51);
        assert_eq!(parsed["sample_count"], 512);
    }

    #[test]
    fn test_json_formatter_info() {
        assert_eq!(JsonFormatter.name(), "json");
        assert!(!JsonFormatter.description().is_empty());
    }
}
