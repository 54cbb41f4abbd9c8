//! Configuration for collection computations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use rentcycle_core::{RentError, RentResult};

use crate::ledger::{OverlapPolicy, DEFAULT_OVERLAP_POLICY};

/// Days after a period ends before an unpaid balance is overdue.
pub const GRACE_PERIOD_DAYS: i64 = 5;

/// Monthly penalty rate applied to overdue balances.
pub const PENALTY_RATE: Decimal = dec!(0.02);

/// Cycles a gap walk may visit before it is treated as runaway.
pub const MAX_CYCLE_ITERATIONS: u32 = 100;

/// Configuration for pending-rent, gap and advice computations.
///
/// Omitted keys take their defaults when loaded from TOML.
///
/// ```toml
/// grace_period_days = 7
/// penalty_rate = 0.015
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Days after a period ends before it counts as overdue.
    pub grace_period_days: i64,

    /// Penalty per started 30-day block of lateness, as a fraction of the
    /// overdue balance.
    pub penalty_rate: Decimal,

    /// Upper bound on cycles visited by one gap walk.
    pub max_cycle_iterations: u32,

    /// How a payment spanning several periods is attributed.
    pub overlap_policy: OverlapPolicy,

    /// Enable parallel bulk processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum tenant count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            grace_period_days: GRACE_PERIOD_DAYS,
            penalty_rate: PENALTY_RATE,
            max_cycle_iterations: MAX_CYCLE_ITERATIONS,
            overlap_policy: DEFAULT_OVERLAP_POLICY,
            parallel: true,
            parallel_threshold: 64,
        }
    }
}

impl CollectionConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the grace period in days.
    #[must_use]
    pub fn with_grace_period_days(mut self, days: i64) -> Self {
        self.grace_period_days = days;
        self
    }

    /// Sets the monthly penalty rate.
    #[must_use]
    pub fn with_penalty_rate(mut self, rate: Decimal) -> Self {
        self.penalty_rate = rate;
        self
    }

    /// Sets the gap-walk iteration cap.
    #[must_use]
    pub fn with_max_cycle_iterations(mut self, max: u32) -> Self {
        self.max_cycle_iterations = max;
        self
    }

    /// Sets the overlap attribution policy.
    #[must_use]
    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks the settings for values no computation can use.
    ///
    /// # Errors
    ///
    /// Returns `RentError::ConfigError` for a negative grace period or
    /// penalty rate, or a zero iteration cap.
    pub fn validate(&self) -> RentResult<()> {
        if self.grace_period_days < 0 {
            return Err(RentError::config(format!(
                "grace_period_days must not be negative, got {}",
                self.grace_period_days
            )));
        }
        if self.penalty_rate < Decimal::ZERO {
            return Err(RentError::config(format!(
                "penalty_rate must not be negative, got {}",
                self.penalty_rate
            )));
        }
        if self.max_cycle_iterations == 0 {
            return Err(RentError::config("max_cycle_iterations must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> RentResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| RentError::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> RentResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RentError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default() {
        let config = CollectionConfig::default();
        assert_eq!(config.grace_period_days, 5);
        assert_eq!(config.penalty_rate, dec!(0.02));
        assert_eq!(config.max_cycle_iterations, 100);
        assert_eq!(config.overlap_policy, OverlapPolicy::FullAmountPerPeriod);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = CollectionConfig::new()
            .with_grace_period_days(10)
            .with_penalty_rate(dec!(0.05))
            .with_max_cycle_iterations(24)
            .with_parallel(false)
            .with_threshold(8);

        assert_eq!(config.grace_period_days, 10);
        assert_eq!(config.penalty_rate, dec!(0.05));
        assert_eq!(config.max_cycle_iterations, 24);
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 8);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(CollectionConfig::new().with_grace_period_days(-1).validate().is_err());
        assert!(CollectionConfig::new().with_penalty_rate(dec!(-0.01)).validate().is_err());
        assert!(matches!(
            CollectionConfig::new().with_max_cycle_iterations(0).validate(),
            Err(RentError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_should_parallelize() {
        let config = CollectionConfig::new().with_threshold(10);
        assert!(!config.should_parallelize(5));
        assert!(!CollectionConfig::sequential().should_parallelize(1_000));

        #[cfg(feature = "parallel")]
        assert!(config.should_parallelize(10));

        #[cfg(not(feature = "parallel"))]
        assert!(!config.should_parallelize(10));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = CollectionConfig::from_toml_str(
            r#"
            grace_period_days = 7
            overlap_policy = "pro_rata_by_days"
            "#,
        )
        .unwrap();

        assert_eq!(config.grace_period_days, 7);
        assert_eq!(config.overlap_policy, OverlapPolicy::ProRataByDays);
        assert_eq!(config.penalty_rate, PENALTY_RATE);
        assert_eq!(config.max_cycle_iterations, MAX_CYCLE_ITERATIONS);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(CollectionConfig::from_toml_str("grace_period_days = \"soon\"").is_err());
        assert!(CollectionConfig::from_toml_str("max_cycle_iterations = 0").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grace_period_days = 3").unwrap();
        writeln!(file, "parallel = false").unwrap();

        let config = CollectionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.grace_period_days, 3);
        assert!(!config.parallel);
    }

    #[test]
    fn test_from_missing_file() {
        let err = CollectionConfig::from_file("/nonexistent/rentcycle.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
