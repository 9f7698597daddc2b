//! Trend estimation configuration.

use crate::error::TrendError;

/// Configuration for [`estimate_trends`](crate::estimate_trends).
#[derive(Debug, Clone)]
pub struct TrendConfig {
    significance_level: f64,
    confidence: f64,
    min_points: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            confidence: 0.95,
            min_points: 3,
        }
    }
}

impl TrendConfig {
    /// Set the p-value threshold below which a trend is significant.
    pub fn with_significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    /// Set the confidence level of the Theil-Sen slope interval.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the minimum number of valid years for a fit.
    pub fn with_min_points(mut self, n: usize) -> Self {
        self.min_points = n;
        self
    }

    /// Returns the significance level.
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Returns the slope-interval confidence.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns the minimum number of valid years.
    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Checks all fields, reporting every failure at once.
    ///
    /// # Errors
    ///
    /// Returns [`TrendError::Validation`] listing each invalid field.
    pub fn validate(&self) -> Result<(), TrendError> {
        let mut errors = Vec::new();
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            errors.push(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            errors.push(format!("confidence must be in (0, 1), got {}", self.confidence));
        }
        if self.min_points < 2 {
            errors.push(format!("min_points must be >= 2, got {}", self.min_points));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TrendError::Validation {
                count: errors.len(),
                details: errors.join("; "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = TrendConfig::default();
        assert_eq!(config.significance_level(), 0.05);
        assert_eq!(config.confidence(), 0.95);
        assert_eq!(config.min_points(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = TrendConfig::default()
            .with_significance_level(0.1)
            .with_confidence(0.9)
            .with_min_points(5);
        assert_eq!(config.significance_level(), 0.1);
        assert_eq!(config.confidence(), 0.9);
        assert_eq!(config.min_points(), 5);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = TrendConfig::default()
            .with_significance_level(0.0)
            .with_confidence(f64::NAN)
            .with_min_points(1);
        match config.validate() {
            Err(TrendError::Validation { count, details }) => {
                assert_eq!(count, 3);
                assert!(details.contains("significance_level"));
                assert!(details.contains("min_points"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
