//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tracker
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::validation::LeavePolicy;

use super::types::TrackerConfig;

/// Loads and provides access to the tracker configuration.
///
/// # File Format
///
/// ```text
/// data_dir: /var/lib/leavetracker
/// employees_file: employees.csv
/// requests_file: leave_requests.csv
/// backup_dir: backups
/// policy:
///   annual_max_days: 14
///   sick_certificate_threshold_days: 3
/// ```
///
/// Any key may be omitted.
///
/// # Example
///
/// ```no_run
/// use leave_tracker::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./tracker.yaml").unwrap();
/// println!("Data directory: {}", loader.config().data_dir.display());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TrackerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file cannot be read (`ConfigNotFound`)
    /// - The file is not valid YAML for [`TrackerConfig`] (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TrackerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, path_str)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml(content: &str) -> TrackerResult<Self> {
        Self::parse(content, "<inline>".to_string())
    }

    fn parse(content: &str, path: String) -> TrackerResult<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self {
                config: TrackerConfig::default(),
            });
        }

        let config = serde_yaml::from_str(content)
            .map_err(|e| TrackerError::ConfigParseError {
                path,
                message: e.to_string(),
            })?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> TrackerConfig {
        self.config
    }

    /// Returns the validation policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.config.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_load_full_configuration() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "data_dir: /tmp/leave\n\
             employees_file: staff.csv\n\
             policy:\n  annual_max_days: 10\n  sick_certificate_threshold_days: 2"
        )
        .unwrap();

        let loader = ConfigLoader::load(file.path()).unwrap();
        let config = loader.config();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/leave"));
        assert_eq!(config.employees_path(), PathBuf::from("/tmp/leave/staff.csv"));
        assert_eq!(config.requests_file, "leave_requests.csv");
        assert_eq!(loader.policy().annual_max_days, 10);
        assert_eq!(loader.policy().sick_certificate_threshold_days, 2);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let loader = ConfigLoader::from_yaml("").unwrap();
        assert_eq!(loader.into_config(), TrackerConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/tracker.yaml");

        match result {
            Err(TrackerError::ConfigNotFound { path }) => {
                assert!(path.contains("tracker.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "policy:\n  annual_max_days: fourteen").unwrap();

        match ConfigLoader::load(file.path()) {
            Err(TrackerError::ConfigParseError { path, message }) => {
                assert_eq!(path, file.path().display().to_string());
                assert!(!message.is_empty());
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
