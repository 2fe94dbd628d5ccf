//! Similarity-norms benchmark file parser.
//!
//! Tab-separated tabular text. Lines starting with `#` are comments; the
//! first non-comment line is a header naming at least `word1`, `word2` and
//! `similarity`, in any column order. Extra columns are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{EvalError, EvalResult};
use crate::similarity::SimilarityPair;

/// Column positions discovered from the header line.
struct Columns {
    word1: usize,
    word2: usize,
    similarity: usize,
}

impl Columns {
    fn from_header(path: &Path, lineno: usize, header: &str) -> EvalResult<Columns> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |name: &str| -> EvalResult<usize> {
            names.iter().position(|&n| n == name).ok_or_else(|| {
                EvalError::format(path, lineno, format!("header is missing column {name:?}"))
            })
        };
        Ok(Columns {
            word1: find("word1")?,
            word2: find("word2")?,
            similarity: find("similarity")?,
        })
    }

    fn width(&self) -> usize {
        self.word1.max(self.word2).max(self.similarity) + 1
    }
}

/// Parse a tab-separated similarity benchmark file into pairs, in file order.
pub fn read_similarity_pairs(path: impl AsRef<Path>) -> EvalResult<Vec<SimilarityPair>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| EvalError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut columns: Option<Columns> = None;
    let mut pairs = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| EvalError::io(path, e))?;
        let lineno = i + 1;

        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let columns = match &columns {
            Some(columns) => columns,
            None => {
                columns = Some(Columns::from_header(path, lineno, &line)?);
                continue;
            }
        };

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < columns.width() {
            return Err(EvalError::format(
                path,
                lineno,
                format!(
                    "expected at least {} tab-separated fields, found {}",
                    columns.width(),
                    fields.len()
                ),
            ));
        }

        let rating_field = fields[columns.similarity].trim();
        let similarity: f64 = rating_field.parse().map_err(|_| {
            EvalError::format(path, lineno, format!("invalid rating {rating_field:?}"))
        })?;

        pairs.push(SimilarityPair::new(
            fields[columns.word1].trim(),
            fields[columns.word2].trim(),
            similarity,
        ));
    }

    match columns {
        Some(_) => Ok(pairs),
        None => Err(EvalError::format(path, 1, "missing header line")),
    }
}
