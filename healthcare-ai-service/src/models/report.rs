//! JSON envelope returned by the model for risk reports.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Body returned to the caller when the model omits `report_markdown`.
pub const MISSING_REPORT_TEXT: &str = "Error: No report text found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
    Unknown,
}

impl RiskLevel {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "moderate" => RiskLevel::Moderate,
            "high" => RiskLevel::High,
            "critical" => RiskLevel::Critical,
            _ => RiskLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskReport {
    /// Only used for logs and metrics, so any JSON value is accepted.
    #[serde(default)]
    pub risk_level: Option<Value>,
    #[serde(default)]
    pub report_markdown: Option<String>,
}

impl RiskReport {
    pub fn from_model_output(text: &str) -> Result<Self, serde_json::Error> {
        super::from_json_object(text.as_bytes())
    }

    pub fn level(&self) -> RiskLevel {
        match &self.risk_level {
            Some(Value::String(level)) => RiskLevel::parse(level),
            _ => RiskLevel::Unknown,
        }
    }

    pub fn into_report_text(self) -> String {
        self.report_markdown
            .unwrap_or_else(|| MISSING_REPORT_TEXT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_markdown_and_level() {
        let report = RiskReport::from_model_output(
            r###"{"risk_level": "High", "report_markdown": "## Overall NCD Risk Assessment\n**High**"}"###,
        )
        .unwrap();

        assert_eq!(report.level(), RiskLevel::High);
        assert_eq!(
            report.into_report_text(),
            "## Overall NCD Risk Assessment\n**High**"
        );
    }

    #[test]
    fn missing_markdown_falls_back_to_placeholder() {
        let report = RiskReport::from_model_output(r#"{"risk_level": "Low"}"#).unwrap();
        assert_eq!(report.into_report_text(), MISSING_REPORT_TEXT);
    }

    #[test]
    fn unexpected_level_is_unknown() {
        let report = RiskReport::from_model_output(r#"{"risk_level": "Severe"}"#).unwrap();
        assert_eq!(report.level(), RiskLevel::Unknown);
    }

    #[test]
    fn non_string_level_is_unknown_but_report_survives() {
        let report =
            RiskReport::from_model_output(r###"{"risk_level": 3, "report_markdown": "## Report"}"###)
                .unwrap();
        assert_eq!(report.level(), RiskLevel::Unknown);
        assert_eq!(report.into_report_text(), "## Report");
    }

    #[test]
    fn null_markdown_falls_back_to_placeholder() {
        let report =
            RiskReport::from_model_output(r#"{"risk_level": "High", "report_markdown": null}"#)
                .unwrap();
        assert_eq!(report.into_report_text(), MISSING_REPORT_TEXT);
    }

    #[test]
    fn rejects_array_envelope() {
        assert!(RiskReport::from_model_output(r###"["High", "## Report"]"###).is_err());
    }

    #[test]
    fn rejects_non_json_output() {
        assert!(RiskReport::from_model_output("## Not JSON").is_err());
    }
}
