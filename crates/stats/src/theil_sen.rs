//! Theil-Sen robust line fit.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::StatsError;
use crate::{kendall_term, median, sorted, tie_groups};

/// Result of a Theil-Sen fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheilSen {
    /// Median of the pairwise slopes.
    pub slope: f64,
    /// `median(y) - slope * median(x)`.
    pub intercept: f64,
    /// Lower and upper slope bounds at the requested confidence, when the
    /// Kendall variance is defined.
    pub interval: Option<(f64, f64)>,
}

/// Fits `y = intercept + slope * x` by the median of pairwise slopes.
///
/// Only pairs with strictly different `x` contribute a slope. The
/// confidence interval follows Sen (1968): the slope ranks bracketing
/// `z * sigma` around the centre, with `sigma^2` the Kendall variance
/// corrected for ties in both `x` and `y`. Rank positions are rounded half
/// to even.
///
/// `confidence` may be given either way round (0.95 and 0.05 are treated
/// alike).
///
/// # Errors
///
/// - [`StatsError::LengthMismatch`] if `x` and `y` differ in length.
/// - [`StatsError::InvalidProbability`] if `confidence` is not in (0, 1).
/// - [`StatsError::InsufficientData`] if no pair has distinct `x` values.
pub fn theil_sen(x: &[f64], y: &[f64], confidence: f64) -> Result<TheilSen, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(StatsError::InvalidProbability { value: confidence });
    }

    let n = x.len();
    let mut slopes = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in 0..n {
            let dx = x[j] - x[i];
            if dx > 0.0 {
                slopes.push((y[j] - y[i]) / dx);
            }
        }
    }
    slopes.sort_by(f64::total_cmp);

    let (Some(slope), Some(my), Some(mx)) =
        (median(&slopes), median(&sorted(y)), median(&sorted(x)))
    else {
        return Err(StatsError::InsufficientData {
            needed: 2,
            got: tie_groups(x).len(),
        });
    };
    let intercept = my - slope * mx;
    let interval = confidence_interval(&slopes, x, y, confidence)?;

    Ok(TheilSen {
        slope,
        intercept,
        interval,
    })
}

fn confidence_interval(
    slopes: &[f64],
    x: &[f64],
    y: &[f64],
    confidence: f64,
) -> Result<Option<(f64, f64)>, StatsError> {
    let alpha = if confidence > 0.5 {
        1.0 - confidence
    } else {
        confidence
    };
    let normal = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution {
        reason: e.to_string(),
    })?;
    let z = normal.inverse_cdf(alpha / 2.0);

    let ties = |data: &[f64]| -> f64 { tie_groups(data).into_iter().map(kendall_term).sum() };
    let sigsq = (kendall_term(y.len()) - ties(x) - ties(y)) / 18.0;
    if sigsq.is_nan() || sigsq < 0.0 {
        return Ok(None);
    }
    let sigma = sigsq.sqrt();

    let nt = slopes.len() as f64;
    let last = slopes.len() as i64 - 1;
    let upper = (((nt - z * sigma) / 2.0).round_ties_even() as i64).min(last);
    let lower = (((nt + z * sigma) / 2.0).round_ties_even() as i64 - 1).max(0);
    if upper < 0 || lower > last {
        return Ok(None);
    }
    Ok(Some((slopes[lower as usize], slopes[upper as usize])))
}
