//! Load and evaluation configuration.

use serde::{Deserialize, Serialize};

/// Default vector dimensionality (fastText-style 300d vectors).
pub const DEFAULT_DIMENSION: usize = 300;

/// Default row capacity: read at most the first million vectors.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// Options controlling how a vector file is read into a
/// [`crate::VectorTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Number of components per row. Rows with fewer fields than
    /// `dimension + 1` (word plus components) are a format error; extra
    /// trailing fields are ignored.
    pub dimension: usize,

    /// Maximum number of data rows to read. Lines beyond the cap are never
    /// read; the table is truncated to the rows actually present, never
    /// padded.
    pub capacity: usize,

    /// Rescale every row to unit L2 norm after the full load.
    pub normalize: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            capacity: DEFAULT_CAPACITY,
            normalize: true,
        }
    }
}

impl LoadOptions {
    /// Set the vector dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the row capacity cap.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enable or disable post-load normalization.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}
