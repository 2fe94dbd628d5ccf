//! Analogy completion: predict the fourth word of "a1 is to a2 as b1 is to ?"
//! by vector arithmetic and nearest-neighbor search over the full vocabulary.
//!
//! Two ranking methods are supported:
//!
//! - **Additive** (Mikolov et al., 2013): predict `b1 - a1 + a2` and rank the
//!   vocabulary by similarity to that vector.
//! - **Multiplicative** (Levy & Goldberg, 2014): rescale each cosine to
//!   `[0, 1]` via `(1 + cos) / 2`, then rank by
//!   `(cos(v, b1) * cos(v, a2)) / (cos(v, a1) + eps)`.
//!
//! Queries containing any out-of-vocabulary word are excluded from scoring
//! and counted as missing; they are never errors.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::{dot, l2_norm};
use crate::vectors::VectorTable;

/// Similarity value forced onto suppressed candidates; below any reachable
/// cosine, so a suppressed word can never win the argmax unless every other
/// candidate is also suppressed.
const SUPPRESSED: f64 = -1.0;

/// One analogy tuple: a1 is to a2 as b1 is to b2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalogyQuery {
    /// First word of the source pair.
    pub a1: String,
    /// Second word of the source pair.
    pub a2: String,
    /// First word of the target pair.
    pub b1: String,
    /// The held-out answer.
    pub b2: String,
}

impl AnalogyQuery {
    /// Build a query from four words.
    pub fn new(
        a1: impl Into<String>,
        a2: impl Into<String>,
        b1: impl Into<String>,
        b2: impl Into<String>,
    ) -> Self {
        Self {
            a1: a1.into(),
            a2: a2.into(),
            b1: b1.into(),
            b2: b2.into(),
        }
    }
}

/// Vector-arithmetic method used to rank candidate answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalogyMethod {
    /// Mikolov et al.: nearest neighbor of `b1 - a1 + a2`.
    Additive,
    /// Levy & Goldberg: multiplicative combination of three cosines.
    Multiplicative,
}

impl fmt::Display for AnalogyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalogyMethod::Additive => write!(f, "additive"),
            AnalogyMethod::Multiplicative => write!(f, "multiplicative"),
        }
    }
}

impl FromStr for AnalogyMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "additive" => Ok(AnalogyMethod::Additive),
            "multiplicative" => Ok(AnalogyMethod::Multiplicative),
            other => Err(format!(
                "unknown analogy method {other:?} (expected additive or multiplicative)"
            )),
        }
    }
}

/// Batching strategy for the similarity computation.
///
/// Both strategies compute the same `O(vocab * scored * dim)` multiply-adds
/// and produce identical results up to floating-point associativity.
/// `WholeMatrix` holds the full `(vocab x scored)` similarity buffer and
/// walks the vocabulary once, computing every query column in the same pass;
/// `PerQuery` holds a single vocab-length column at a time, trading the batch
/// throughput for bounded memory. `WholeMatrix` is the canonical default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStrategy {
    /// One `(vocab x scored)` buffer, single pass over the vocabulary.
    WholeMatrix,
    /// One vocab-length column per query.
    PerQuery,
}

/// Outcome of an analogy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalogyOutcome {
    /// Fraction of scored queries answered exactly; `None` when no query
    /// could be scored (the undefined-statistic sentinel, not a 0.0).
    pub accuracy: Option<f64>,
    /// Queries fully covered by the vocabulary.
    pub scored: usize,
    /// All queries, including those with missing words.
    pub total: usize,
}

/// A scored query resolved to row indices, aligned with its batch column.
struct ResolvedQuery<'a> {
    a1: usize,
    a2: usize,
    b1: usize,
    b1_word: &'a str,
    target: &'a str,
}

/// Solve `queries` against `table`, scoring exact case-sensitive matches.
///
/// Queries with any word (including the target) outside the vocabulary count
/// toward `total` but not `scored` and never enter the batch. Each query's
/// prediction is the vocabulary word with the highest similarity, ties broken
/// by first-occurring row.
///
/// Self-match suppression: the similarity of every vocabulary word that
/// appears as b1 in *any* scored query is forced to -1 in *every* query's
/// column (one mask over the union of b1 words, applied matrix-wide), so the
/// trivial "answer with the word you started from" prediction is impossible.
pub fn solve_analogies(
    queries: &[AnalogyQuery],
    table: &VectorTable,
    method: AnalogyMethod,
    strategy: SolveStrategy,
) -> AnalogyOutcome {
    let total = queries.len();

    let mut resolved: Vec<ResolvedQuery> = Vec::new();
    for query in queries {
        match (
            table.row_of(&query.a1),
            table.row_of(&query.a2),
            table.row_of(&query.b1),
            table.contains(&query.b2),
        ) {
            (Some(a1), Some(a2), Some(b1), true) => resolved.push(ResolvedQuery {
                a1,
                a2,
                b1,
                b1_word: &query.b1,
                target: &query.b2,
            }),
            _ => {}
        }
    }

    let scored = resolved.len();
    if scored == 0 {
        return AnalogyOutcome {
            accuracy: None,
            scored: 0,
            total,
        };
    }

    // Row norms are only needed when the table was not normalized at load
    // time; for a normalized table the dot product already is the cosine.
    let row_norms: Option<Vec<f64>> = if table.is_normalized() {
        None
    } else {
        Some((0..table.len()).map(|r| l2_norm(table.row(r))).collect())
    };

    let suppressed: HashSet<&str> = resolved.iter().map(|q| q.b1_word).collect();

    let scorer = QueryScorer {
        table,
        method,
        row_norms,
        predicted: match method {
            AnalogyMethod::Additive => resolved.iter().map(|q| predict_vector(table, q)).collect(),
            AnalogyMethod::Multiplicative => Vec::new(),
        },
    };

    let vocab = table.len();
    let mut correct = 0usize;

    match strategy {
        SolveStrategy::WholeMatrix => {
            let mut similarities = vec![0.0f64; vocab * scored];
            for row in 0..vocab {
                let base = row * scored;
                if suppressed.contains(table.word(row)) {
                    similarities[base..base + scored].fill(SUPPRESSED);
                    continue;
                }
                for (column, query) in resolved.iter().enumerate() {
                    similarities[base + column] = scorer.similarity(row, column, query);
                }
            }
            for (column, query) in resolved.iter().enumerate() {
                let winner = argmax_rows(|row| similarities[row * scored + column], vocab);
                if table.word(winner) == query.target {
                    correct += 1;
                }
            }
        }
        SolveStrategy::PerQuery => {
            let mut column_buf = vec![0.0f64; vocab];
            for (column, query) in resolved.iter().enumerate() {
                for (row, slot) in column_buf.iter_mut().enumerate() {
                    *slot = if suppressed.contains(table.word(row)) {
                        SUPPRESSED
                    } else {
                        scorer.similarity(row, column, query)
                    };
                }
                let winner = argmax_rows(|row| column_buf[row], vocab);
                if table.word(winner) == query.target {
                    correct += 1;
                }
            }
        }
    }

    AnalogyOutcome {
        accuracy: Some(correct as f64 / scored as f64),
        scored,
        total,
    }
}

/// Per-(row, query) similarity evaluation shared by both strategies.
struct QueryScorer<'a> {
    table: &'a VectorTable,
    method: AnalogyMethod,
    row_norms: Option<Vec<f64>>,
    /// Additive method only: one predicted vector per scored query, aligned
    /// with the batch column, paired with its norm.
    predicted: Vec<(Vec<f64>, f64)>,
}

impl QueryScorer<'_> {
    fn similarity(&self, row: usize, column: usize, query: &ResolvedQuery) -> f64 {
        let v = self.table.row(row);
        match self.method {
            AnalogyMethod::Additive => {
                let (predicted, predicted_norm) = &self.predicted[column];
                self.cosine(v, row, predicted, *predicted_norm)
            }
            AnalogyMethod::Multiplicative => {
                let cos_a1 = (1.0 + self.cosine_to_row(v, row, query.a1)) / 2.0;
                let cos_a2 = (1.0 + self.cosine_to_row(v, row, query.a2)) / 2.0;
                let cos_b1 = (1.0 + self.cosine_to_row(v, row, query.b1)) / 2.0;
                (cos_b1 * cos_a2) / (cos_a1 + f64::EPSILON)
            }
        }
    }

    /// Cosine between vocabulary row `row` (slice `v`) and an arbitrary
    /// operand. On a normalized table this is the raw dot product; otherwise
    /// both norms divide out, with near-zero norms guarded to 0.
    fn cosine(&self, v: &[f64], row: usize, operand: &[f64], operand_norm: f64) -> f64 {
        let product = dot(v, operand);
        match &self.row_norms {
            None => product,
            Some(norms) => {
                let scale = norms[row] * operand_norm;
                if scale < f64::EPSILON {
                    0.0
                } else {
                    product / scale
                }
            }
        }
    }

    fn cosine_to_row(&self, v: &[f64], row: usize, operand_row: usize) -> f64 {
        let operand_norm = self
            .row_norms
            .as_ref()
            .map_or(1.0, |norms| norms[operand_row]);
        self.cosine(v, row, self.table.row(operand_row), operand_norm)
    }
}

/// Predicted vector `b1 - a1 + a2` for the additive method, with its norm.
fn predict_vector(table: &VectorTable, query: &ResolvedQuery) -> (Vec<f64>, f64) {
    let a1 = table.row(query.a1);
    let a2 = table.row(query.a2);
    let b1 = table.row(query.b1);
    let predicted: Vec<f64> = b1
        .iter()
        .zip(a1.iter())
        .zip(a2.iter())
        .map(|((b, x), y)| b - x + y)
        .collect();
    let norm = l2_norm(&predicted);
    (predicted, norm)
}

/// Stable argmax over rows: strict `>` keeps the first-occurring row on
/// exact ties, matching the table's stored order.
fn argmax_rows(score: impl Fn(usize) -> f64, rows: usize) -> usize {
    let mut best_row = 0;
    let mut best = f64::NEG_INFINITY;
    for row in 0..rows {
        let s = score(row);
        if s > best {
            best = s;
            best_row = row;
        }
    }
    best_row
}
