//! Pairwise semantic similarity: cosine predictions vs human ratings.
//!
//! For every pair whose two words are both in vocabulary, the predicted
//! similarity is the cosine of their vectors (general dot-over-norms formula,
//! never assuming pre-normalization). The benchmark score is the Spearman
//! rank correlation between human ratings and predictions, plus a
//! coverage-adjusted variant that discounts by the fraction of pairs actually
//! evaluated.

use serde::{Deserialize, Serialize};

use crate::metrics::spearman;
use crate::util::cosine_similarity;
use crate::vectors::VectorTable;

/// A benchmark pair: two words and a human similarity rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    /// First word.
    pub word1: String,
    /// Second word.
    pub word2: String,
    /// Human rating (scale is benchmark-specific; only ranks matter).
    pub similarity: f64,
}

impl SimilarityPair {
    /// Build a pair.
    pub fn new(word1: impl Into<String>, word2: impl Into<String>, similarity: f64) -> Self {
        Self {
            word1: word1.into(),
            word2: word2.into(),
            similarity,
        }
    }
}

/// One scored pair, kept for downstream inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairPrediction {
    /// First word.
    pub word1: String,
    /// Second word.
    pub word2: String,
    /// Human rating.
    pub similarity: f64,
    /// Predicted cosine similarity.
    pub predicted_similarity: f64,
}

/// Outcome of a similarity run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityOutcome {
    /// Spearman correlation between ratings and predictions; `None` when
    /// undefined (no scored pairs, or zero variance on either side).
    pub score: Option<f64>,
    /// `score * scored / total`, the coverage penalty.
    pub adjusted_score: Option<f64>,
    /// Pairs with both words in vocabulary.
    pub scored: usize,
    /// All pairs, including those with missing words.
    pub total: usize,
    /// Per-pair prediction table, in input order over scored pairs.
    pub predictions: Vec<PairPrediction>,
}

/// Score `pairs` against `table`.
///
/// Pairs with either word out of vocabulary count toward `total` only; they
/// are silently excluded, never errors.
pub fn score_similarities(pairs: &[SimilarityPair], table: &VectorTable) -> SimilarityOutcome {
    let total = pairs.len();

    let mut ratings = Vec::new();
    let mut predicted = Vec::new();
    let mut predictions = Vec::new();

    for pair in pairs {
        if let (Some(v1), Some(v2)) = (table.get(&pair.word1), table.get(&pair.word2)) {
            let cos = cosine_similarity(v1, v2);
            ratings.push(pair.similarity);
            predicted.push(cos);
            predictions.push(PairPrediction {
                word1: pair.word1.clone(),
                word2: pair.word2.clone(),
                similarity: pair.similarity,
                predicted_similarity: cos,
            });
        }
    }

    let scored = predictions.len();
    let score = spearman(&ratings, &predicted);
    let adjusted_score = score.map(|s| s * scored as f64 / total as f64);

    SimilarityOutcome {
        score,
        adjusted_score,
        scored,
        total,
        predictions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit-norm fixture; pairwise cosines are hand-computable.
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
    fn test_monotone_ratings_score_one() {
        // Cosines: king/woman 0.96, man/king 0.8, man/woman 0.6,
        // man/apple -0.6; ratings in the same order.
        let table = fixture();
        let pairs = vec![
            SimilarityPair::new("king", "woman", 9.0),
            SimilarityPair::new("man", "king", 7.0),
            SimilarityPair::new("man", "woman", 5.0),
            SimilarityPair::new("man", "apple", 1.0),
        ];
        let outcome = score_similarities(&pairs, &table);
        assert_eq!(outcome.scored, 4);
        assert_eq!(outcome.total, 4);
        let score = outcome.score.unwrap();
        assert!((score - 1.0).abs() < 1e-12);
        let adjusted = outcome.adjusted_score.unwrap();
        assert!((adjusted - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_adjusted_score_applies_exact_coverage_fraction() {
        // 3 in-vocabulary pairs, 2 with a missing word: coverage 3/5.
        let table = fixture();
        let pairs = vec![
            SimilarityPair::new("king", "woman", 9.0),
            SimilarityPair::new("man", "king", 7.0),
            SimilarityPair::new("man", "apple", 1.0),
            SimilarityPair::new("man", "zebra", 4.0),
            SimilarityPair::new("plum", "apple", 6.0),
        ];
        let outcome = score_similarities(&pairs, &table);
        assert_eq!(outcome.scored, 3);
        assert_eq!(outcome.total, 5);
        let score = outcome.score.unwrap();
        let adjusted = outcome.adjusted_score.unwrap();
        assert!((adjusted - score * 3.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_scored_pairs_is_undefined() {
        let table = fixture();
        let pairs = vec![SimilarityPair::new("plum", "zebra", 5.0)];
        let outcome = score_similarities(&pairs, &table);
        assert_eq!(outcome.scored, 0);
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.score, None);
        assert_eq!(outcome.adjusted_score, None);
        assert!(outcome.predictions.is_empty());
    }

    #[test]
    fn test_empty_input_is_undefined() {
        let table = fixture();
        let outcome = score_similarities(&[], &table);
        assert_eq!(outcome.scored, 0);
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.score, None);
        assert_eq!(outcome.adjusted_score, None);
    }

    #[test]
    fn test_zero_variance_ratings_are_undefined() {
        // Identical human ratings (and identical predictions) leave the rank
        // correlation undefined; this must surface the sentinel, not a
        // silent 1.0 or 0.0.
        let table = fixture();
        let pairs = vec![
            SimilarityPair::new("man", "king", 5.0),
            SimilarityPair::new("woman", "queen", 5.0),
        ];
        let outcome = score_similarities(&pairs, &table);
        assert_eq!(outcome.scored, 2);
        assert_eq!(outcome.score, None);
        assert_eq!(outcome.adjusted_score, None);
    }

    #[test]
    fn test_predictions_table_contents() {
        let table = fixture();
        let pairs = vec![
            SimilarityPair::new("man", "king", 7.0),
            SimilarityPair::new("man", "missing", 2.0),
        ];
        let outcome = score_similarities(&pairs, &table);
        assert_eq!(outcome.predictions.len(), 1);
        let p = &outcome.predictions[0];
        assert_eq!(p.word1, "man");
        assert_eq!(p.word2, "king");
        assert_eq!(p.similarity, 7.0);
        assert!((p.predicted_similarity - 0.8).abs() < 1e-12);
    }
}
