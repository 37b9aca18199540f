//! serde-backed formats: the whole [`Analysis`] as JSON or YAML.

use super::registry::{FormatError, Formatter};
use crate::pipeline::Analysis;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, analysis: &Analysis) -> Result<String, FormatError> {
        serde_json::to_string_pretty(analysis)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Full analysis as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, analysis: &Analysis) -> Result<String, FormatError> {
        serde_yaml::to_string(analysis).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Full analysis as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Analyzer;

    #[test]
    fn test_json_shape() {
        let analysis = Analyzer::with_defaults().unwrap().analyze("el balón cuesta");
        let text = JsonFormatter.serialize(&analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["parse"]["accepted"], true);
        assert_eq!(value["categories"][2], "verbo");
        assert_eq!(value["tokens"][0]["lexical_type"], "identifier");
        assert_eq!(value["parse"]["steps"][0]["action"]["kind"], "start");
        assert!(value["fallback"].is_null());
    }

    #[test]
    fn test_yaml_rejection_reason() {
        let analysis = Analyzer::with_defaults().unwrap().analyze("cuesta");
        let text = YamlFormatter.serialize(&analysis).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();

        assert_eq!(value["parse"]["accepted"], serde_yaml::Value::Bool(false));
        assert_eq!(
            value["parse"]["error"]["reason"],
            serde_yaml::Value::String("no_production_for_lookahead".into())
        );
    }
}
