//! Dense vector table loaded from the word2vec text exchange format.
//!
//! The file format: the first line is a header and is discarded unconditionally
//! (typically vocabulary size and dimension, never parsed); every subsequent
//! line is `<word> <f1> <f2> ... <fd>` space-separated. Reading stops at
//! end-of-file or at the configured capacity, whichever comes first.
//!
//! The table is built once and immutable thereafter; both evaluation pipelines
//! borrow it read-only. At the default limits (1,000,000 rows of 300 f64
//! components) the matrix is the single large allocation in the process, about
//! 2.4 GB, so it is allocated once and never copied.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::config::LoadOptions;
use crate::error::{EvalError, EvalResult};
use crate::util::l2_norm;

/// An in-memory word-embedding table: one word per row of a dense row-major
/// f64 matrix, plus a word-to-row index.
///
/// Duplicate words in the source file persist as separate rows (an accepted
/// quirk of the format); the index resolves a duplicated word to its
/// last-seen row.
#[derive(Debug, Clone)]
pub struct VectorTable {
    words: Vec<String>,
    /// Row-major storage, `words.len() * dimension` components.
    data: Vec<f64>,
    /// Word to last-seen row index.
    index: HashMap<String, usize>,
    dimension: usize,
    normalized: bool,
}

impl VectorTable {
    /// Load a table from `path` according to `options`.
    ///
    /// Fails with [`EvalError::Io`] if the file cannot be read, with
    /// [`EvalError::Format`] if the header line is missing or any data row
    /// within capacity has fewer than `dimension + 1` whitespace-separated
    /// fields or an unparsable component, and with
    /// [`EvalError::DegenerateVector`] if normalization meets a row whose
    /// norm is below epsilon.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> EvalResult<VectorTable> {
        let path = path.as_ref();
        info!("loading vectors {}", path.display());

        let file = File::open(path).map_err(|e| EvalError::io(path, e))?;
        let mut lines = BufReader::new(file).lines();

        // The header carries vocabulary size and dimension but is not trusted;
        // the configured dimension and capacity govern the read.
        match lines.next() {
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(EvalError::io(path, e)),
            None => return Err(EvalError::format(path, 1, "missing header line")),
        }

        let dimension = options.dimension;
        let mut words = Vec::new();
        let mut data = Vec::new();

        for (i, line) in lines.enumerate() {
            if i >= options.capacity {
                break;
            }
            let line = line.map_err(|e| EvalError::io(path, e))?;
            let lineno = i + 2; // 1-based, after the header

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < dimension + 1 {
                return Err(EvalError::format(
                    path,
                    lineno,
                    format!(
                        "expected at least {} fields (word + {} components), found {}",
                        dimension + 1,
                        dimension,
                        fields.len()
                    ),
                ));
            }

            words.push(fields[0].to_string());
            for &field in &fields[1..=dimension] {
                let value: f64 = field.parse().map_err(|_| {
                    EvalError::format(path, lineno, format!("invalid float {field:?}"))
                })?;
                data.push(value);
            }
        }

        let index = words
            .iter()
            .enumerate()
            .map(|(row, word)| (word.clone(), row))
            .collect();

        let mut table = VectorTable {
            words,
            data,
            index,
            dimension,
            normalized: false,
        };

        if options.normalize {
            table.normalize()?;
        }

        info!(
            "loaded {} vectors of dimension {}",
            table.len(),
            table.dimension()
        );
        Ok(table)
    }

    /// Rescale every row in place to unit L2 (Euclidean) norm, each by its
    /// own norm. Runs over the fully loaded matrix, not incrementally.
    fn normalize(&mut self) -> EvalResult<()> {
        for (row, chunk) in self.data.chunks_exact_mut(self.dimension).enumerate() {
            let norm = l2_norm(chunk);
            if norm < f64::EPSILON {
                return Err(EvalError::DegenerateVector {
                    word: self.words[row].clone(),
                    row,
                    norm,
                });
            }
            for x in chunk.iter_mut() {
                *x /= norm;
            }
        }
        self.normalized = true;
        Ok(())
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Components per row.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// True if rows were rescaled to unit L2 norm at load time.
    ///
    /// Downstream similarity code uses straight dot products when this holds
    /// and falls back to the general cosine formula otherwise.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Word at `row`.
    pub fn word(&self, row: usize) -> &str {
        &self.words[row]
    }

    /// Vector at `row`.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.dimension..(row + 1) * self.dimension]
    }

    /// Row index for `word`, the last-seen row if the word is duplicated.
    pub fn row_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Vector for `word`, without copying.
    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.row_of(word).map(|row| self.row(row))
    }

    /// True if `word` is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Iterate over `(word, vector)` rows in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        (0..self.len()).map(|row| (self.word(row), self.row(row)))
    }

    /// Build a table directly from rows, for fixtures and tests.
    ///
    /// Rows must all share one dimension. `normalized` declares whether the
    /// caller already rescaled them; it is not verified.
    pub fn from_rows(rows: Vec<(String, Vec<f64>)>, dimension: usize, normalized: bool) -> Self {
        let mut words = Vec::with_capacity(rows.len());
        let mut data = Vec::with_capacity(rows.len() * dimension);
        for (word, vector) in rows {
            assert_eq!(vector.len(), dimension, "row dimension mismatch");
            words.push(word);
            data.extend(vector);
        }
        let index = words
            .iter()
            .enumerate()
            .map(|(row, word)| (word.clone(), row))
            .collect();
        VectorTable {
            words,
            data,
            index,
            dimension,
            normalized,
        }
    }
}
