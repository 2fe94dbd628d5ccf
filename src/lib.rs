//! # vecbench
//!
//! Evaluates word-embedding vector sets against two held-out benchmarks:
//! analogy completion ("A is to B as C is to ?") and human-rated pairwise
//! semantic similarity.
//!
//! Two independent pipelines share one data structure:
//!
//! - [`VectorTable`]: parses the word2vec text exchange format into a dense
//!   row-major matrix plus a word-to-row index, and owns normalization.
//! - [`solve_analogies`]: predicts the fourth word of each analogy tuple via
//!   vector arithmetic and nearest-neighbor search over the full vocabulary.
//! - [`score_similarities`]: correlates per-pair cosine similarities against
//!   human ratings with a Spearman rank correlation.
//!
//! The [`runner::EvaluationRunner`] ties the pipelines to benchmark files and
//! collects timed [`runner::EvaluationResult`] rows; [`reports`] renders them
//! as TSV tables or JSON.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate a vector set against analogy and similarity benchmarks
//! cargo run --bin vecbench -- wiki.en.vec \
//!     --analogies syntactic.txt --analogies semantic.txt \
//!     --similarities en_simlex.tsv --format tsv
//! ```

pub mod analogy;
pub mod config;
pub mod datasets;
pub mod error;
pub mod metrics;
pub mod reports;
pub mod runner;
pub mod similarity;
pub mod util;
pub mod vectors;

pub use analogy::{solve_analogies, AnalogyMethod, AnalogyOutcome, AnalogyQuery, SolveStrategy};
pub use config::LoadOptions;
pub use error::{EvalError, EvalResult};
pub use similarity::{score_similarities, SimilarityOutcome, SimilarityPair};
pub use vectors::VectorTable;
