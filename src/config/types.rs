//! Configuration types for the leave tracker.
//!
//! This module contains the strongly-typed configuration structure that
//! is deserialized from the YAML configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::validation::LeavePolicy;

/// Default directory holding the data files.
pub const DEFAULT_DATA_DIR: &str = "leavetracker_data";

/// The complete tracker configuration.
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration.
///
/// # Example
///
/// ```
/// use leave_tracker::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.employees_path(), config.data_dir.join("employees.csv"));
/// assert_eq!(config.policy.annual_max_days, 14);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Root directory for all data files.
    pub data_dir: PathBuf,
    /// Employees CSV file name, relative to `data_dir`.
    pub employees_file: String,
    /// Leave requests CSV file name, relative to `data_dir`.
    pub requests_file: String,
    /// Backup directory name, relative to `data_dir`.
    pub backup_dir: String,
    /// Validation thresholds.
    pub policy: LeavePolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            employees_file: "employees.csv".to_string(),
            requests_file: "leave_requests.csv".to_string(),
            backup_dir: "backups".to_string(),
            policy: LeavePolicy::default(),
        }
    }
}

impl TrackerConfig {
    /// Returns a default configuration rooted at `data_dir`.
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Full path of the employees file.
    pub fn employees_path(&self) -> PathBuf {
        self.data_dir.join(&self.employees_file)
    }

    /// Full path of the leave requests file.
    pub fn requests_path(&self) -> PathBuf {
        self.data_dir.join(&self.requests_file)
    }

    /// Full path of the backup directory.
    pub fn backup_path(&self) -> PathBuf {
        self.data_dir.join(&self.backup_dir)
    }
}
