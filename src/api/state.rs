//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::TaxEstimator;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded configuration and a tax estimator built from its tables.
/// Both are read-only once the server starts.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    estimator: Arc<TaxEstimator>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let estimator = TaxEstimator::new(config.tax_tables().clone());
        Self {
            config: Arc::new(config),
            estimator: Arc::new(estimator),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the estimator used for withholding.
    pub fn estimator(&self) -> &TaxEstimator {
        &self.estimator
    }
}
