//! Google-analogies benchmark file parser.
//!
//! Lines beginning with `:` start a named subset; the rest of the line,
//! trimmed, is the subset label. Every other non-blank line is an
//! `<a1> <a2> <b1> <b2>` space-separated 4-tuple.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analogy::AnalogyQuery;
use crate::error::{EvalError, EvalResult};

/// A named group of analogy queries (e.g. `capital-common-countries`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalogySubset {
    /// Subset label from the `:` header; empty for data before any header.
    pub label: String,
    /// Queries in file order.
    pub queries: Vec<AnalogyQuery>,
}

/// Parse an analogy benchmark file into its subsets, in file order.
///
/// A data line with a field count other than four is a format error. Data
/// before any `:` header lands in a subset with an empty label.
pub fn read_analogies(path: impl AsRef<Path>) -> EvalResult<Vec<AnalogySubset>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| EvalError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut subsets: Vec<AnalogySubset> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| EvalError::io(path, e))?;
        let lineno = i + 1;

        if let Some(label) = line.strip_prefix(':') {
            subsets.push(AnalogySubset {
                label: label.trim().to_string(),
                queries: Vec::new(),
            });
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(EvalError::format(
                path,
                lineno,
                format!("expected 4 words, found {}", fields.len()),
            ));
        }

        if subsets.is_empty() {
            subsets.push(AnalogySubset {
                label: String::new(),
                queries: Vec::new(),
            });
        }
        if let Some(subset) = subsets.last_mut() {
            subset.queries.push(AnalogyQuery::new(
                fields[0], fields[1], fields[2], fields[3],
            ));
        }
    }

    Ok(subsets)
}
