//! Report generation for evaluation results.
//!
//! Supports tab-separated tables for downstream tooling and JSON for CI
//! integration.

pub mod json;
pub mod tsv;

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::runner::{EvaluationResult, SimilarityEvaluation};

/// Report format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Tab-separated tables.
    Tsv,
    /// JSON for CI integration.
    Json,
    /// Both formats.
    Both,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tsv" => Ok(ReportFormat::Tsv),
            "json" => Ok(ReportFormat::Json),
            "both" => Ok(ReportFormat::Both),
            other => Err(format!(
                "unknown report format {other:?} (expected tsv, json or both)"
            )),
        }
    }
}

/// Complete evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Generation timestamp, RFC 3339.
    pub generated_at: String,
    /// Vector file that was evaluated.
    pub vectors: String,
    /// One row per (benchmark subset, method) combination.
    pub results: Vec<EvaluationResult>,
    /// Full similarity outcomes, one per benchmark file, with per-pair
    /// prediction tables.
    pub similarity: Vec<SimilarityEvaluation>,
}

impl EvaluationReport {
    /// Assemble a report, stamping it with the current time.
    pub fn new(
        vectors: impl Into<String>,
        results: Vec<EvaluationResult>,
        similarity: Vec<SimilarityEvaluation>,
    ) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            vectors: vectors.into(),
            results,
            similarity,
        }
    }

    /// Generate report content in the requested format.
    pub fn generate(&self, format: ReportFormat) -> ReportOutput {
        ReportOutput {
            tsv: matches!(format, ReportFormat::Tsv | ReportFormat::Both)
                .then(|| tsv::generate_tsv(self)),
            json: matches!(format, ReportFormat::Json | ReportFormat::Both)
                .then(|| json::generate_json(self)),
        }
    }

    /// Write the report next to `base_path`, one file per generated format
    /// (`.tsv` and/or `.json` extension).
    pub fn write_to_file(&self, format: ReportFormat, base_path: &Path) -> std::io::Result<()> {
        let output = self.generate(format);

        if let Some(tsv_content) = output.tsv {
            std::fs::write(base_path.with_extension("tsv"), tsv_content)?;
        }
        if let Some(json_content) = output.json {
            std::fs::write(base_path.with_extension("json"), json_content)?;
        }
        Ok(())
    }
}

/// Generated report output.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    /// TSV content (if generated).
    pub tsv: Option<String>,
    /// JSON content (if generated).
    pub json: Option<String>,
}
