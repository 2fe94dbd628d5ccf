//! Shared vector math and instrumentation helpers.

use std::time::{Duration, Instant};

/// Dot product of two equal-length slices.
///
/// Callers guarantee equal lengths; rows of a [`crate::VectorTable`] all share
/// one dimension by construction.
#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 (Euclidean) norm of a vector.
#[inline]
pub fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity between two vectors.
///
/// Uses the general dot-product-over-norms formula, never assuming
/// pre-normalized input. Returns 0.0 if the vectors have different lengths or
/// either has a near-zero norm.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a < f64::EPSILON || norm_b < f64::EPSILON {
        0.0
    } else {
        dot(a, b) / (norm_a * norm_b)
    }
}

/// Render an optional statistic with the given precision, `NA` when the
/// statistic is undefined. Single home of the sentinel rendering, so a
/// missing score can never be confused with a 0.
pub fn fmt_stat(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "NA".to_string(),
    }
}

/// Run `f` and return its result together with the elapsed wall-clock time.
///
/// Explicit instrumentation hook: callers that want timing wrap the call
/// site, nothing is timed behind their back.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_unnormalized_inputs() {
        // Scaling either input must not change the cosine.
        let a = vec![3.0, 4.0];
        let b = vec![6.0, 8.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        let a = vec![1.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_fmt_stat_renders_na_for_undefined() {
        assert_eq!(fmt_stat(Some(0.25), 6), "0.250000");
        assert_eq!(fmt_stat(Some(0.25), 4), "0.2500");
        assert_eq!(fmt_stat(Some(0.0), 6), "0.000000");
        assert_eq!(fmt_stat(None, 6), "NA");
    }

    #[test]
    fn test_timed_returns_value() {
        let (value, duration) = timed(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(duration <= Duration::from_secs(1));
    }
}
