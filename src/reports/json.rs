//! JSON report generation for CI integration.

use crate::reports::EvaluationReport;

/// Serialize the report as pretty-printed JSON.
///
/// Undefined statistics serialize as `null`.
pub fn generate_json(report: &EvaluationReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::EvaluationResult;
    use std::time::Duration;

    #[test]
    fn test_json_round_trips() {
        let report = EvaluationReport::new(
            "test.vec",
            vec![EvaluationResult {
                label: "family (additive)".to_string(),
                score: None,
                duration: Duration::from_millis(250),
                scored: 0,
                total: 3,
            }],
            Vec::new(),
        );

        let json = generate_json(&report);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["vectors"], "test.vec");
        assert_eq!(parsed["results"][0]["label"], "family (additive)");
        // Undefined score is null, not 0.
        assert!(parsed["results"][0]["score"].is_null());
    }
}
