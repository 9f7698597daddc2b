//! Mann-Kendall monotonic trend test.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::StatsError;
use crate::{kendall_term, tie_groups};

/// Direction of a detected monotonic trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    /// Significant upward trend.
    Increasing,
    /// Significant downward trend.
    Decreasing,
    /// No significant trend.
    NoTrend,
}

/// Outcome of the original (non-seasonal, no autocorrelation correction)
/// Mann-Kendall test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MannKendall {
    /// `S = sum_{i<j} sign(x_j - x_i)`.
    pub s: f64,
    /// Variance of `S` corrected for tied groups.
    pub var_s: f64,
    /// Continuity-corrected standard score.
    pub z: f64,
    /// Two-sided p-value under the normal approximation.
    pub p_value: f64,
    /// Kendall's tau, `S / (n(n-1)/2)`.
    pub tau: f64,
    /// Whether `|z|` exceeds the two-sided critical value at `alpha`.
    pub significant: bool,
    /// Direction of the trend, or [`TrendDirection::NoTrend`].
    pub direction: TrendDirection,
}

/// Runs the Mann-Kendall test on `values` in time order.
///
/// # Errors
///
/// - [`StatsError::InvalidProbability`] if `alpha` is not in (0, 1).
/// - [`StatsError::InsufficientData`] if fewer than 2 values are given.
pub fn mann_kendall(values: &[f64], alpha: f64) -> Result<MannKendall, StatsError> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(StatsError::InvalidProbability { value: alpha });
    }
    let n = values.len();
    if n < 2 {
        return Err(StatsError::InsufficientData { needed: 2, got: n });
    }

    let mut s = 0.0;
    for i in 0..n - 1 {
        for j in i + 1..n {
            s += sign(values[j] - values[i]);
        }
    }

    let ties: f64 = tie_groups(values).into_iter().map(kendall_term).sum();
    let var_s = (kendall_term(n) - ties) / 18.0;

    let z = if var_s <= 0.0 {
        0.0
    } else if s > 0.0 {
        (s - 1.0) / var_s.sqrt()
    } else if s < 0.0 {
        (s + 1.0) / var_s.sqrt()
    } else {
        0.0
    };

    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution {
        reason: e.to_string(),
    })?;
    let p_value = 2.0 * (1.0 - normal.cdf(z.abs()));
    let significant = z.abs() > normal.inverse_cdf(1.0 - alpha / 2.0);
    let direction = match (significant, z > 0.0) {
        (true, true) => TrendDirection::Increasing,
        (true, false) => TrendDirection::Decreasing,
        (false, _) => TrendDirection::NoTrend,
    };
    let tau = s / (0.5 * n as f64 * (n as f64 - 1.0));

    Ok(MannKendall {
        s,
        var_s,
        z,
        p_value,
        tau,
        significant,
        direction,
    })
}

fn sign(d: f64) -> f64 {
    if d > 0.0 {
        1.0
    } else if d < 0.0 {
        -1.0
    } else {
        0.0
    }
}
