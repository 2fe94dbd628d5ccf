//! Rank-correlation statistics for the similarity pipeline.
//!
//! Spearman correlation is computed as Pearson correlation over average
//! ranks, which handles ties the way the standard definition requires. When
//! the correlation is undefined (fewer than two observations, or zero
//! variance on either side) the functions return `None` rather than a NaN or
//! a fake score.

/// Spearman rank correlation between two equal-length samples.
///
/// Returns `None` when the samples differ in length, hold fewer than two
/// observations, or either side is constant (zero rank variance), all cases
/// where the coefficient is undefined.
pub fn spearman(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    pearson(&average_ranks(a), &average_ranks(b))
}

/// Pearson correlation coefficient, or `None` on zero variance.
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a < f64::EPSILON || var_b < f64::EPSILON {
        return None;
    }
    Some(cov / (var_a * var_b).sqrt())
}

/// Assign 1-based ranks, giving tied values the average of the ranks they
/// would occupy.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // ranks start..end (1-based) average to (start + end + 1) / 2
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spearman_perfect_monotone() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [10.0, 20.0, 30.0, 40.0];
        let rho = spearman(&a, &b).unwrap();
        assert!((rho - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_perfect_inverse() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [9.0, 7.0, 5.0, 3.0];
        let rho = spearman(&a, &b).unwrap();
        assert!((rho + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_nonlinear_monotone_is_one() {
        // Rank correlation only sees order, not magnitude.
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [1.0, 8.0, 27.0, 1000.0];
        let rho = spearman(&a, &b).unwrap();
        assert!((rho - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_handles_ties_with_average_ranks() {
        let a = [1.0, 2.0, 2.0, 4.0];
        let b = [1.0, 3.0, 3.0, 4.0];
        // Same tie structure on both sides: still a perfect correlation.
        let rho = spearman(&a, &b).unwrap();
        assert!((rho - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_zero_variance_is_undefined() {
        let a = [3.0, 3.0, 3.0];
        let b = [1.0, 2.0, 3.0];
        assert_eq!(spearman(&a, &b), None);
        assert_eq!(spearman(&b, &a), None);
        // Both sides constant is still undefined, not a silent 1.0.
        assert_eq!(spearman(&a, &a), None);
    }

    #[test]
    fn test_spearman_too_few_observations() {
        assert_eq!(spearman(&[], &[]), None);
        assert_eq!(spearman(&[1.0], &[2.0]), None);
        assert_eq!(spearman(&[1.0, 2.0], &[1.0]), None);
    }

    #[test]
    fn test_average_ranks_ties() {
        let ranks = average_ranks(&[10.0, 20.0, 20.0, 30.0]);
        assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.0]);
    }
}
