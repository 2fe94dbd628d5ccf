//! Tab-separated report tables.
//!
//! Three tables: the main results table (one row per benchmark subset and
//! method), the similarity scores table (raw and coverage-adjusted Spearman
//! per source file), and the per-pair predictions table. Undefined statistics
//! render as `NA`, distinguishable from a true 0.

use std::fmt::Write;

use crate::reports::EvaluationReport;
use crate::runner::{EvaluationResult, SimilarityEvaluation};
use crate::util::fmt_stat;

/// Decimal places for scores in TSV tables.
const SCORE_PRECISION: usize = 6;

/// Render the full TSV report: results, then similarity scores, then
/// predictions, separated by blank lines.
pub fn generate_tsv(report: &EvaluationReport) -> String {
    let mut out = String::new();

    out.push_str(&results_table(&report.results));
    if !report.similarity.is_empty() {
        out.push('\n');
        out.push_str(&similarity_scores_table(&report.similarity));
        out.push('\n');
        out.push_str(&predictions_table(&report.similarity));
    }

    out
}

/// The main results table: `label score duration_secs scored total`.
pub fn results_table(results: &[EvaluationResult]) -> String {
    let mut out = String::from("label\tscore\tduration_secs\tscored\ttotal\n");
    for row in results {
        let _ = writeln!(
            out,
            "{}\t{}\t{:.3}\t{}\t{}",
            row.label,
            fmt_stat(row.score, SCORE_PRECISION),
            row.duration.as_secs_f64(),
            row.scored,
            row.total
        );
    }
    out
}

/// Per-file similarity scores:
/// `source score adjusted_score scored total`.
pub fn similarity_scores_table(evaluations: &[SimilarityEvaluation]) -> String {
    let mut out = String::from("source\tscore\tadjusted_score\tscored\ttotal\n");
    for evaluation in evaluations {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            evaluation.source,
            fmt_stat(evaluation.outcome.score, SCORE_PRECISION),
            fmt_stat(evaluation.outcome.adjusted_score, SCORE_PRECISION),
            evaluation.outcome.scored,
            evaluation.outcome.total
        );
    }
    out
}

/// Per-pair predictions across all similarity files:
/// `source word1 word2 similarity predicted_similarity`.
pub fn predictions_table(evaluations: &[SimilarityEvaluation]) -> String {
    let mut out = String::from("source\tword1\tword2\tsimilarity\tpredicted_similarity\n");
    for evaluation in evaluations {
        for p in &evaluation.outcome.predictions {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}\t{:.6}",
                evaluation.source, p.word1, p.word2, p.similarity, p.predicted_similarity
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::{PairPrediction, SimilarityOutcome};
    use std::time::Duration;

    #[test]
    fn test_results_table_renders_na_for_undefined() {
        let rows = vec![
            EvaluationResult {
                label: "family (additive)".to_string(),
                score: Some(0.25),
                duration: Duration::from_secs(2),
                scored: 4,
                total: 5,
            },
            EvaluationResult {
                label: "empty (additive)".to_string(),
                score: None,
                duration: Duration::ZERO,
                scored: 0,
                total: 3,
            },
        ];
        let table = results_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "label\tscore\tduration_secs\tscored\ttotal");
        assert_eq!(lines[1], "family (additive)\t0.250000\t2.000\t4\t5");
        assert_eq!(lines[2], "empty (additive)\tNA\t0.000\t0\t3");
    }

    #[test]
    fn test_predictions_table_rows() {
        let evaluations = vec![SimilarityEvaluation {
            source: "en_norms.tsv".to_string(),
            outcome: SimilarityOutcome {
                score: Some(1.0),
                adjusted_score: Some(0.5),
                scored: 1,
                total: 2,
                predictions: vec![PairPrediction {
                    word1: "man".to_string(),
                    word2: "king".to_string(),
                    similarity: 7.0,
                    predicted_similarity: 0.8,
                }],
            },
            duration: Duration::from_millis(10),
        }];

        let scores = similarity_scores_table(&evaluations);
        assert!(scores.contains("en_norms.tsv\t1.000000\t0.500000\t1\t2"));

        let predictions = predictions_table(&evaluations);
        assert!(predictions.contains("en_norms.tsv\tman\tking\t7\t0.800000"));
    }
}
