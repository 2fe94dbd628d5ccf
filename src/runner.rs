//! Evaluation driver: runs benchmark files through the two pipelines and
//! collects timed result rows.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analogy::{solve_analogies, AnalogyMethod, SolveStrategy};
use crate::datasets::{read_analogies, read_similarity_pairs};
use crate::error::EvalResult;
use crate::similarity::{score_similarities, SimilarityOutcome};
use crate::util::{fmt_stat, timed};
use crate::vectors::VectorTable;

/// One (benchmark subset, method) result row. Pure value object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Benchmark name plus method, e.g. `"family (additive)"`.
    pub label: String,
    /// Scalar score; `None` when the statistic is undefined.
    pub score: Option<f64>,
    /// Wall-clock time of the run.
    pub duration: Duration,
    /// Items actually scored.
    pub scored: usize,
    /// All items in the subset.
    pub total: usize,
}

/// A similarity benchmark file's full outcome, kept next to its source name
/// for the scores and predictions tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityEvaluation {
    /// Source file name.
    pub source: String,
    /// Scores and per-pair predictions.
    pub outcome: SimilarityOutcome,
    /// Wall-clock time of the run.
    pub duration: Duration,
}

impl SimilarityEvaluation {
    /// Flatten into a result row (raw Spearman score; the adjusted score
    /// lives in the similarity scores table).
    pub fn to_result(&self) -> EvaluationResult {
        EvaluationResult {
            label: format!("{} (similarity)", self.source),
            score: self.outcome.score,
            duration: self.duration,
            scored: self.outcome.scored,
            total: self.outcome.total,
        }
    }
}

/// Runs benchmark files against one borrowed [`VectorTable`].
///
/// The table is the single large allocation in the process; the runner only
/// borrows it, so any number of runs share the same read-only matrix.
pub struct EvaluationRunner<'a> {
    table: &'a VectorTable,
    strategy: SolveStrategy,
}

impl<'a> EvaluationRunner<'a> {
    /// Create a runner with the canonical whole-matrix batching.
    pub fn new(table: &'a VectorTable) -> Self {
        Self {
            table,
            strategy: SolveStrategy::WholeMatrix,
        }
    }

    /// Override the batching strategy.
    pub fn with_strategy(mut self, strategy: SolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Run every subset of an analogy benchmark file with every method,
    /// producing one result row per (subset, method) combination.
    pub fn run_analogy_file(
        &self,
        path: impl AsRef<Path>,
        methods: &[AnalogyMethod],
    ) -> EvalResult<Vec<EvaluationResult>> {
        let path = path.as_ref();
        let subsets = read_analogies(path)?;
        info!(
            "solving analogies from {} ({} subsets)",
            path.display(),
            subsets.len()
        );

        let mut results = Vec::with_capacity(subsets.len() * methods.len());
        for &method in methods {
            for subset in &subsets {
                let (outcome, duration) = timed(|| {
                    solve_analogies(&subset.queries, self.table, method, self.strategy)
                });
                let label = format!("{} ({})", subset.label, method);
                info!(
                    "{}: accuracy {} over {}/{} in {:.3}s",
                    label,
                    fmt_stat(outcome.accuracy, 4),
                    outcome.scored,
                    outcome.total,
                    duration.as_secs_f64()
                );
                results.push(EvaluationResult {
                    label,
                    score: outcome.accuracy,
                    duration,
                    scored: outcome.scored,
                    total: outcome.total,
                });
            }
        }
        Ok(results)
    }

    /// Run one similarity benchmark file.
    pub fn run_similarity_file(&self, path: impl AsRef<Path>) -> EvalResult<SimilarityEvaluation> {
        let path = path.as_ref();
        let pairs = read_similarity_pairs(path)?;
        info!(
            "predicting similarity norms from {} ({} pairs)",
            path.display(),
            pairs.len()
        );

        let (outcome, duration) = timed(|| score_similarities(&pairs, self.table));
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!(
            "{}: spearman {} (adjusted {}) over {}/{} in {:.3}s",
            source,
            fmt_stat(outcome.score, 4),
            fmt_stat(outcome.adjusted_score, 4),
            outcome.scored,
            outcome.total,
            duration.as_secs_f64()
        );

        Ok(SimilarityEvaluation {
            source,
            outcome,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture() -> VectorTable {
        VectorTable::from_rows(
            vec![
                ("man".to_string(), vec![1.0, 0.0]),
                ("king".to_string(), vec![0.8, 0.6]),
                ("woman".to_string(), vec![0.6, 0.8]),
                ("queen".to_string(), vec![0.28, 0.96]),
                ("apple".to_string(), vec![-0.6, -0.8]),
            ],
            2,
            true,
        )
    }

    #[test]
    fn test_run_analogy_file_labels_per_subset_and_method() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            ": royal\nman king woman queen\n: fruit\nman king woman grape\n"
        )
        .unwrap();

        let table = fixture();
        let runner = EvaluationRunner::new(&table);
        let results = runner
            .run_analogy_file(
                file.path(),
                &[AnalogyMethod::Additive, AnalogyMethod::Multiplicative],
            )
            .unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].label, "royal (additive)");
        assert_eq!(results[0].score, Some(1.0));
        assert_eq!(results[1].label, "fruit (additive)");
        // grape is out of vocabulary: nothing scored, sentinel accuracy.
        assert_eq!(results[1].scored, 0);
        assert_eq!(results[1].total, 1);
        assert_eq!(results[1].score, None);
        assert_eq!(results[2].label, "royal (multiplicative)");
    }

    #[test]
    fn test_run_similarity_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "# norms\nword1\tword2\tsimilarity\nking\twoman\t9.0\nman\tking\t7.0\nman\tapple\t1.0\nman\tzebra\t4.0\n"
        )
        .unwrap();

        let table = fixture();
        let runner = EvaluationRunner::new(&table);
        let evaluation = runner.run_similarity_file(file.path()).unwrap();

        assert_eq!(evaluation.outcome.scored, 3);
        assert_eq!(evaluation.outcome.total, 4);
        let score = evaluation.outcome.score.unwrap();
        assert!((score - 1.0).abs() < 1e-12);
        let adjusted = evaluation.outcome.adjusted_score.unwrap();
        assert!((adjusted - 0.75).abs() < 1e-12);

        let row = evaluation.to_result();
        assert!(row.label.ends_with("(similarity)"));
        assert_eq!(row.scored, 3);
    }
}
