//! Statistical primitives for survey analysis.
//!
//! This crate provides the pure math the analysis pipeline is built on. It
//! knows nothing about tables, selections, or reports — every function takes
//! plain slices and returns plain result structs:
//!
//! - [`descriptive`]: count, mean, median, sample variance and standard
//!   deviation, min, max
//! - [`frequency`]: value→count tables with a missing bucket and rounded
//!   percentages
//! - [`rank`]: average-rank transform (ties share their mean rank)
//! - [`correlation`]: Pearson and Spearman coefficients with two-sided
//!   p-values from the t distribution
//! - [`shapiro`]: Shapiro–Wilk normality test (Royston's AS R94
//!   approximation)
//!
//! # Examples
//!
//! ```
//! use anketa_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```
//!
//! ```
//! use anketa_stats::correlation::pearson;
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.0, 4.0, 6.0, 8.0, 10.0];
//! let corr = pearson(&x, &y).unwrap();
//! assert!((corr.r - 1.0).abs() < 1e-12);
//! ```

pub mod correlation;
pub mod descriptive;
pub mod frequency;
pub mod rank;
pub mod shapiro;
