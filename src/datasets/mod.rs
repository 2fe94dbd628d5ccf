//! Benchmark-file parsers.
//!
//! Two plain-text formats are read: Google-analogies files (`:`-prefixed
//! subset headers, space-separated 4-tuples) and tab-separated similarity
//! norms (`#` comments, header-named columns).

pub mod analogies;
pub mod similarities;

pub use analogies::{read_analogies, AnalogySubset};
pub use similarities::read_similarity_pairs;
