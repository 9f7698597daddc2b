//! Extraction configuration.

use std::fmt;
use std::str::FromStr;

use hytrend_calendar::StartMonth;

use crate::error::ParamsError;
use crate::record::Family;

/// Definition of the "constant snowfall start" inside the accumulation
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstantSnowfallRule {
    /// Earliest day with a positive difference whose SWE is never undercut
    /// by a later value up to and including the peak.
    #[default]
    MonotonicToPeak,
    /// Earliest day starting `length` consecutive positive differences.
    PositiveRun {
        /// Run length in observations.
        length: usize,
    },
}

impl ConstantSnowfallRule {
    /// Run length used by the older definition.
    pub const DEFAULT_RUN: usize = 3;
}

impl fmt::Display for ConstantSnowfallRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonotonicToPeak => f.write_str("monotonic"),
            Self::PositiveRun { length } => write!(f, "run:{length}"),
        }
    }
}

impl FromStr for ConstantSnowfallRule {
    type Err = ParamsError;

    /// Accepts `monotonic`, `run` (length 3) or `run:<n>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "monotonic" | "monotonic_to_peak" => Ok(Self::MonotonicToPeak),
            "run" | "positive_run" => Ok(Self::PositiveRun {
                length: Self::DEFAULT_RUN,
            }),
            other => other
                .strip_prefix("run:")
                .and_then(|n| n.parse().ok())
                .map(|length| Self::PositiveRun { length })
                .ok_or_else(|| ParamsError::Validation {
                    count: 1,
                    details: format!("unknown constant snowfall rule: {s:?}"),
                }),
        }
    }
}

/// Configuration for [`extract_basin`](crate::extract_basin).
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    family: Family,
    start_month: u8,
    constant_snowfall: ConstantSnowfallRule,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            family: Family::Swe,
            start_month: StartMonth::SEPTEMBER.get(),
            constant_snowfall: ConstantSnowfallRule::default(),
        }
    }
}

impl ExtractConfig {
    /// Creates a default configuration for `family`.
    pub fn new(family: Family) -> Self {
        Self {
            family,
            ..Self::default()
        }
    }

    /// Set the variable family.
    pub fn with_family(mut self, family: Family) -> Self {
        self.family = family;
        self
    }

    /// Set the first month of the hydrological year.
    pub fn with_start_month(mut self, month: u8) -> Self {
        self.start_month = month;
        self
    }

    /// Set the constant-snowfall definition (SWE only).
    pub fn with_constant_snowfall(mut self, rule: ConstantSnowfallRule) -> Self {
        self.constant_snowfall = rule;
        self
    }

    /// Returns the variable family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Returns the raw start month.
    pub fn start_month(&self) -> u8 {
        self.start_month
    }

    /// Returns the constant-snowfall definition.
    pub fn constant_snowfall(&self) -> ConstantSnowfallRule {
        self.constant_snowfall
    }

    /// Validate the configuration and return the checked start month.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<StartMonth, ParamsError> {
        let mut c = crate::error::ValidationCollector::new();
        let start = StartMonth::new(self.start_month);
        if start.is_err() {
            c.push(format!("start_month must be 1..=12, got {}", self.start_month));
        }
        if let ConstantSnowfallRule::PositiveRun { length } = self.constant_snowfall
            && length == 0
        {
            c.push("constant snowfall run length must be at least 1");
        }
        c.finish()?;
        Ok(start?)
    }
}
