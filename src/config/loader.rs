//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax tables from
//! YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::TaxTables;

/// File name of the tax tables inside a configuration directory.
pub const TAX_TABLES_FILE: &str = "tax_tables.yaml";

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── tax_tables.yaml   # Federal, FICA and state tables for one tax year
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Tax year: {}", loader.tax_tables().tax_year);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    tax_tables: TaxTables,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `tax_tables.yaml` is missing, is not valid YAML,
    /// or describes inconsistent brackets or rates.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tables_path = path.join(TAX_TABLES_FILE);
        let tax_tables = Self::load_yaml::<TaxTables>(&tables_path)?;
        tax_tables.validate()?;

        info!(
            path = %tables_path.display(),
            tax_year = tax_tables.tax_year,
            "Loaded tax tables"
        );

        Ok(Self { tax_tables })
    }

    /// Wraps already-built tables after validating them.
    pub fn from_tables(tax_tables: TaxTables) -> EngineResult<Self> {
        tax_tables.validate()?;
        Ok(Self { tax_tables })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded tax tables.
    pub fn tax_tables(&self) -> &TaxTables {
        &self.tax_tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_config_dir(name: &str, contents: Option<&str>) -> PathBuf {
        let dir = env::temp_dir().join(format!(
            "payroll_engine_config_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        if let Some(contents) = contents {
            fs::write(dir.join(TAX_TABLES_FILE), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_shipped_config() {
        let loader = ConfigLoader::load("./config").unwrap();
        assert_eq!(loader.tax_tables().tax_year, 2024);
        assert_eq!(loader.tax_tables(), &TaxTables::default());
    }

    #[test]
    fn test_load_missing_directory() {
        let err = ConfigLoader::load("/definitely/not/here").unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = temp_config_dir("invalid_yaml", Some("tax_year: [unclosed"));
        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::ConfigParseError { .. }));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_load_rejects_inconsistent_tables() {
        let mut tables = TaxTables::default();
        tables.fica.medicare_rate = rust_decimal::Decimal::from(2);
        let yaml = serde_yaml::to_string(&tables).unwrap();
        let dir = temp_config_dir("inconsistent", Some(&yaml));
        let err = ConfigLoader::load(&dir).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_from_tables_validates() {
        let mut tables = TaxTables::default();
        tables.federal.single.brackets.clear();
        assert!(ConfigLoader::from_tables(tables).is_err());
        assert!(ConfigLoader::from_tables(TaxTables::default()).is_ok());
    }
}
