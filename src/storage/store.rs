//! File-backed data store.
//!
//! This module provides the [`DataStore`] type which owns the on-disk
//! layout: the two CSV files, the backup directory and snapshot files.
//!
//! # Directory Structure
//!
//! ```text
//! leavetracker_data/
//! ├── employees.csv
//! ├── leave_requests.csv
//! ├── <snapshot>.json
//! └── backups/
//!     ├── employees_2025-08-01.csv
//!     └── requests_2025-08-01.csv
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};

use super::records::{EMPLOYEE_HEADERS, EmployeeRecord, LeaveRequestRecord, REQUEST_HEADERS};
use super::snapshot::Snapshot;

/// Paths of the files written by [`DataStore::create_backup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFiles {
    /// Copy of the employees file.
    pub employees: PathBuf,
    /// Copy of the leave requests file.
    pub requests: PathBuf,
}

/// Reads and writes tracker state under a data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
    employees_path: PathBuf,
    requests_path: PathBuf,
    backup_dir: PathBuf,
}

impl DataStore {
    /// Creates a store for the layout described by `config`.
    ///
    /// Nothing is touched on disk until [`initialize`](Self::initialize).
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            employees_path: config.employees_path(),
            requests_path: config.requests_path(),
            backup_dir: config.backup_path(),
        }
    }

    /// Root data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the employees file.
    pub fn employees_path(&self) -> &Path {
        &self.employees_path
    }

    /// Path of the leave requests file.
    pub fn requests_path(&self) -> &Path {
        &self.requests_path
    }

    /// Creates the data and backup directories if missing.
    pub fn initialize(&self) -> TrackerResult<()> {
        for dir in [&self.data_dir, &self.backup_dir] {
            fs::create_dir_all(dir).map_err(|source| storage_error(dir, source))?;
        }
        Ok(())
    }

    /// Reads all employee rows. A missing file reads as empty.
    pub fn load_employees(&self) -> TrackerResult<Vec<EmployeeRecord>> {
        read_records(&self.employees_path)
    }

    /// Replaces the employees file with `records`.
    pub fn save_employees(&self, records: &[EmployeeRecord]) -> TrackerResult<()> {
        write_records(&self.employees_path, &EMPLOYEE_HEADERS, records)
    }

    /// Reads all leave request rows. A missing file reads as empty.
    pub fn load_requests(&self) -> TrackerResult<Vec<LeaveRequestRecord>> {
        read_records(&self.requests_path)
    }

    /// Replaces the leave requests file with `records`.
    pub fn save_requests(&self, records: &[LeaveRequestRecord]) -> TrackerResult<()> {
        write_records(&self.requests_path, &REQUEST_HEADERS, records)
    }

    /// Copies both data files into the backup directory, suffixed with `date`.
    ///
    /// Existing backups for the same date are overwritten.
    pub fn create_backup(&self, date: NaiveDate) -> TrackerResult<BackupFiles> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|source| storage_error(&self.backup_dir, source))?;

        let files = BackupFiles {
            employees: self.backup_dir.join(format!("employees_{}.csv", date)),
            requests: self.backup_dir.join(format!("requests_{}.csv", date)),
        };

        fs::copy(&self.employees_path, &files.employees)
            .map_err(|source| storage_error(&self.employees_path, source))?;
        fs::copy(&self.requests_path, &files.requests)
            .map_err(|source| storage_error(&self.requests_path, source))?;

        info!(
            employees = %files.employees.display(),
            requests = %files.requests.display(),
            "Backup created"
        );
        Ok(files)
    }

    /// Resolves a snapshot file name inside the data directory.
    pub fn snapshot_path(&self, name: &str) -> TrackerResult<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::InvalidSnapshotName);
        }
        Ok(self.data_dir.join(name))
    }

    /// Writes `snapshot` as JSON to the named file.
    pub fn write_snapshot(&self, name: &str, snapshot: &Snapshot) -> TrackerResult<PathBuf> {
        let path = self.snapshot_path(name)?;
        let json = serde_json::to_vec_pretty(snapshot).map_err(|e| TrackerError::StorageParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let tmp = temp_path(&path);
        fs::write(&tmp, json).map_err(|source| storage_error(&tmp, source))?;
        fs::rename(&tmp, &path).map_err(|source| storage_error(&path, source))?;

        info!(
            path = %path.display(),
            employees = snapshot.employees.len(),
            requests = snapshot.requests.len(),
            "Snapshot saved"
        );
        Ok(path)
    }

    /// Reads a snapshot written by [`write_snapshot`](Self::write_snapshot).
    pub fn read_snapshot(&self, name: &str) -> TrackerResult<Snapshot> {
        let path = self.snapshot_path(name)?;
        if !path.exists() {
            return Err(TrackerError::SnapshotNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read(&path).map_err(|source| storage_error(&path, source))?;
        serde_json::from_slice(&content).map_err(|e| TrackerError::StorageParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn storage_error(path: &Path, source: io::Error) -> TrackerError {
    TrackerError::Storage {
        path: path.display().to_string(),
        source,
    }
}

fn csv_error(path: &Path, error: csv::Error) -> TrackerError {
    if error.is_io_error() {
        storage_error(path, io::Error::from(error))
    } else {
        TrackerError::StorageParse {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn read_records<T: DeserializeOwned>(path: &Path) -> TrackerResult<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "Data file missing, starting empty");
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|source| storage_error(path, source))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result.map_err(|e| csv_error(path, e))?);
    }
    Ok(records)
}

fn write_records<T: Serialize>(path: &Path, headers: &[&str], records: &[T]) -> TrackerResult<()> {
    let tmp = temp_path(path);
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(|e| csv_error(&tmp, e))?;

        writer.write_record(headers).map_err(|e| csv_error(&tmp, e))?;
        for record in records {
            writer.serialize(record).map_err(|e| csv_error(&tmp, e))?;
        }
        writer.flush().map_err(|source| storage_error(&tmp, source))?;
    }

    fs::rename(&tmp, path).map_err(|source| storage_error(path, source))?;
    debug!(path = %path.display(), rows = records.len(), "Data file written");
    Ok(())
}
