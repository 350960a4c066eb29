//! Configuration loading and management for the payroll engine.
//!
//! This module loads the tax tables used for withholding estimates from a
//! YAML file, falling back to built-in tables for tax year 2024.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded tax year: {}", config.tax_tables().tax_year);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, TAX_TABLES_FILE};
pub use types::{
    BracketSchedule, BracketTable, FicaRates, ProgressiveStateTax, StateTaxConfig, TaxBracket,
    TaxTables,
};
