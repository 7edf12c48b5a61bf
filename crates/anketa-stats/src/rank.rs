//! Average-rank transform used by Spearman correlation.

/// Assigns 1-based ranks to values, averaging the ranks of ties.
///
/// The returned vector is aligned with the input: `ranks[i]` is the rank of
/// `values[i]`. Tied values all receive the mean of the rank positions they
/// occupy, the standard "fractional" ranking that makes Spearman's rho exact
/// under ties.
///
/// # Examples
///
/// ```
/// use anketa_stats::rank::average_ranks;
///
/// assert_eq!(average_ranks(&[10.0, 20.0, 30.0]), vec![1.0, 2.0, 3.0]);
/// // The two 20s occupy rank positions 2 and 3 → both get 2.5.
/// assert_eq!(average_ranks(&[10.0, 20.0, 20.0, 30.0]), vec![1.0, 2.5, 2.5, 4.0]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Find the run of ties starting at sorted position i.
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // Positions i..j (0-based) hold ranks i+1..=j → average.
        let rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = rank;
        }
        i = j;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tied() {
        assert_eq!(average_ranks(&[5.0, 5.0, 5.0]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_unsorted_input_keeps_alignment() {
        assert_eq!(average_ranks(&[30.0, 10.0, 20.0]), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_empty() {
        assert!(average_ranks(&[]).is_empty());
    }
}
