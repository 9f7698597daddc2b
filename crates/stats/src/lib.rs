//! # hytrend-stats
//!
//! Statistical helpers for the hytrend pipeline: descriptive summaries plus
//! the two robust trend tools applied to every basin and parameter column.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `theil_sen` | Median-of-pairwise-slopes line with confidence bounds |
//! | `mann_kendall` | Non-parametric monotonic trend test |
//! | `error` | Error types |
//!
//! NaN handling is left to callers: every function here expects finite input.

mod error;
mod mann_kendall;
mod theil_sen;

pub use error::StatsError;
pub use mann_kendall::{MannKendall, TrendDirection, mann_kendall};
pub use theil_sen::{TheilSen, theil_sen};

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation (N denominator). Returns 0.0 if empty.
pub fn population_sd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    let ss: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / data.len() as f64).sqrt()
}

/// Middle value of ascending `sorted`, averaging the central pair for even
/// lengths. `None` when empty.
pub fn median(sorted: &[f64]) -> Option<f64> {
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => None,
        n if n % 2 == 0 => Some(0.5 * (sorted[mid - 1] + sorted[mid])),
        _ => Some(sorted[mid]),
    }
}

/// Sorted copy of `data` using IEEE total ordering.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

/// Sizes of groups of equal values (groups of one included).
pub(crate) fn tie_groups(data: &[f64]) -> Vec<usize> {
    let s = sorted(data);
    let mut groups = Vec::new();
    let mut i = 0;
    while i < s.len() {
        let mut j = i + 1;
        while j < s.len() && s[j] == s[i] {
            j += 1;
        }
        groups.push(j - i);
        i = j;
    }
    groups
}

/// Kendall variance term `n(n-1)(2n+5)` shared by both trend tools.
pub(crate) fn kendall_term(n: usize) -> f64 {
    let n = n as f64;
    n * (n - 1.0) * (2.0 * n + 5.0)
}
