use serde::{Deserialize, Serialize};

/// Label used for the missing-value bucket in frequency tables.
pub const MISSING_CATEGORY: &str = "Missing";

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FrequencyEntry {
    /// Category label.
    pub category: String,
    /// Number of rows with this category.
    pub count: usize,
    /// Share of the total row count, in percent, rounded to 2 decimals.
    pub percentage: f64,
}

/// Exhaustive value→count table for one column.
///
/// Every analyzed column gets a frequency table, numeric or not. Missing
/// values form their own bucket rather than being dropped, so the counts
/// always sum to the total row count and the percentages to 100 (± rounding).
/// Categories keep discovery order — first appearance in the data decides the
/// position, and ties are never reordered.
///
/// # Examples
///
/// ```
/// use anketa_stats::frequency::FrequencyTable;
///
/// let observations = vec![
///     Some("4".to_string()),
///     Some("5".to_string()),
///     Some("4".to_string()),
///     None,
/// ];
/// let table = FrequencyTable::from_observations(observations);
///
/// assert_eq!(table.total, 4);
/// assert_eq!(table.entries[0].category, "4");
/// assert_eq!(table.entries[0].count, 2);
/// assert_eq!(table.entries[0].percentage, 50.0);
/// assert_eq!(table.entries[2].category, "Missing");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FrequencyTable {
    /// Rows in discovery order, missing bucket included.
    pub entries: Vec<FrequencyEntry>,
    /// Total number of observations, missing included.
    pub total: usize,
}

impl FrequencyTable {
    /// Builds a frequency table from per-row category observations.
    ///
    /// `None` observations are counted under the [`MISSING_CATEGORY`]
    /// bucket, which appears at the position where the first missing row was
    /// discovered, like any other category.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let mut order: Vec<String> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut total = 0usize;

        for observation in observations {
            total += 1;
            let category = observation.unwrap_or_else(|| MISSING_CATEGORY.to_string());
            match order.iter().position(|c| *c == category) {
                Some(idx) => counts[idx] += 1,
                None => {
                    order.push(category);
                    counts.push(1);
                }
            }
        }

        let entries = order
            .into_iter()
            .zip(counts)
            .map(|(category, count)| FrequencyEntry {
                category,
                count,
                percentage: round2(count as f64 / total as f64 * 100.0),
            })
            .collect();

        Self { entries, total }
    }

    /// Number of missing observations (0 if none were seen).
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.entries
            .iter()
            .find(|e| e.category == MISSING_CATEGORY)
            .map_or(0, |e| e.count)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed(values: &[Option<&str>]) -> FrequencyTable {
        FrequencyTable::from_observations(
            values.iter().map(|v| v.map(std::string::ToString::to_string)),
        )
    }

    #[test]
    fn test_discovery_order_preserved() {
        let table = observed(&[Some("b"), Some("a"), Some("b"), Some("c")]);
        let categories: Vec<_> = table.entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_bucket_counted() {
        let table = observed(&[Some("x"), None, None, Some("x")]);
        assert_eq!(table.missing_count(), 2);
        assert_eq!(table.total, 4);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let table = observed(&[Some("a"), Some("b"), Some("c"), Some("a"), None, Some("b"), Some("a")]);
        let sum: f64 = table.entries.iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 0.1, "percentages summed to {sum}");
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 1/3 of 3 rows → 33.33 after rounding
        let table = observed(&[Some("a"), Some("b"), Some("c")]);
        assert_eq!(table.entries[0].percentage, 33.33);
    }
}
