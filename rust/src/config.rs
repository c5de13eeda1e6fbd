//! Configuration types for the scheduling system.

use pyo3::prelude::*;
use thiserror::Error;

use crate::logging::{self, VERBOSITY_DEBUG};

/// Currency minor units that buy one day of work.
pub const DEFAULT_AMOUNT_PER_DAY: f64 = 100_000.0;

/// Errors raised by [`ScheduleConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("amount_per_day must be a positive number, got {0}")]
    InvalidAmountPerDay(f64),
    #[error("verbosity must be between 0 and {max}, got {0}", max = VERBOSITY_DEBUG)]
    InvalidVerbosity(u8),
}

/// Configuration for process generation and logging.
#[pyclass]
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Amount (currency minor units) corresponding to one day of work
    #[pyo3(get, set)]
    pub amount_per_day: f64,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            amount_per_day: DEFAULT_AMOUNT_PER_DAY,
            verbosity: 0,
        }
    }
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.amount_per_day.is_finite() || self.amount_per_day <= 0.0 {
            return Err(ConfigError::InvalidAmountPerDay(self.amount_per_day));
        }
        if self.verbosity > VERBOSITY_DEBUG {
            return Err(ConfigError::InvalidVerbosity(self.verbosity));
        }
        Ok(())
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (amount_per_day=None, verbosity=None))]
    fn new(amount_per_day: Option<f64>, verbosity: Option<u8>) -> PyResult<Self> {
        let defaults = Self::default();
        let config = Self {
            amount_per_day: amount_per_day.unwrap_or(defaults.amount_per_day),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        };
        config
            .validate()
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
        Ok(config)
    }

    /// Install the stderr log subscriber at this config's verbosity.
    ///
    /// Returns false if a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        logging::init_logging(self.verbosity)
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(amount_per_day={}, verbosity={})",
            self.amount_per_day, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScheduleConfig::default();
        assert!((config.amount_per_day - 100_000.0).abs() < 1e-9);
        assert_eq!(config.verbosity, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_amount_per_day() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let config = ScheduleConfig {
                amount_per_day: bad,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidAmountPerDay(_))
            ));
        }
    }

    #[test]
    fn test_init_logging_from_config() {
        let config = ScheduleConfig {
            verbosity: logging::VERBOSITY_CHECKS,
            ..Default::default()
        };
        let _ = config.init_logging();
        assert!(!config.init_logging());
    }

    #[test]
    fn test_invalid_verbosity() {
        let config = ScheduleConfig {
            verbosity: 4,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidVerbosity(4)));
        assert_eq!(
            ConfigError::InvalidVerbosity(4).to_string(),
            "verbosity must be between 0 and 3, got 4"
        );
    }
}
