//! Chart-data requests handed to the external rendering collaborator.
//!
//! The pipeline supplies numeric arrays only; binning, density estimation,
//! and image generation belong to the renderer. One histogram and one
//! boxplot request is produced per numeric column, plus a single scatter
//! request for the composite pair.

use serde::{Deserialize, Serialize};

/// A least-squares trend line for the scatter overlay.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Fits `y = slope·x + intercept` to the points by least squares.
    ///
    /// Returns `None` when fewer than 2 points are given or the x values
    /// are constant (the slope is undefined).
    ///
    /// ```
    /// use anketa_analysis::chart::TrendLine;
    ///
    /// let line = TrendLine::fit(&[(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)]).unwrap();
    /// assert!((line.slope - 2.0).abs() < 1e-12);
    /// assert!((line.intercept - 1.0).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
        let ss_x: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        if ss_x <= 0.0 {
            return None;
        }
        let ss_xy: f64 = points
            .iter()
            .map(|(x, y)| (x - mean_x) * (y - mean_y))
            .sum();
        let slope = ss_xy / ss_x;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }
}

/// A single chart the renderer is asked to draw.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartRequest {
    /// Histogram with a density-curve overlay for one numeric column.
    Histogram {
        variable: String,
        /// Non-missing values in row order.
        values: Vec<f64>,
    },
    /// Boxplot for one numeric column.
    Boxplot {
        variable: String,
        /// Non-missing values in row order.
        values: Vec<f64>,
    },
    /// Scatter of the two composites over pairwise-complete rows.
    Scatter {
        x_label: String,
        y_label: String,
        points: Vec<(f64, f64)>,
        /// Linear trend overlay; absent when a fit is undefined.
        trend: Option<TrendLine>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_line_undefined_for_constant_x() {
        assert!(TrendLine::fit(&[(2.0, 1.0), (2.0, 5.0)]).is_none());
    }

    #[test]
    fn test_trend_line_needs_two_points() {
        assert!(TrendLine::fit(&[(1.0, 1.0)]).is_none());
    }
}
