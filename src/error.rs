//! Error types for the leave tracker.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts an operation. Leave requests that fail
//! validation are not errors; see [`LeaveRejection`](crate::validation::LeaveRejection).

use thiserror::Error;

use crate::models::{EmployeeId, LeaveType, RequestId};

/// The main error type for the leave tracker.
///
/// # Example
///
/// ```
/// use leave_tracker::error::TrackerError;
/// use leave_tracker::models::LeaveType;
///
/// let error = TrackerError::UnsupportedLeaveType {
///     leave_type: LeaveType::Maternity,
/// };
/// assert_eq!(error.to_string(), "Unsupported leave type: MATERNITY");
/// ```
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The leave type has no request kind or balance behind it.
    #[error("Unsupported leave type: {leave_type}")]
    UnsupportedLeaveType {
        /// The rejected leave type.
        leave_type: LeaveType,
    },

    /// No employee is registered under the given id.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unknown employee id.
        employee_id: EmployeeId,
    },

    /// A request was handed an employee record other than its own.
    #[error("Leave request {request_id} belongs to employee {expected}, not {actual}")]
    EmployeeMismatch {
        /// The request being transitioned.
        request_id: RequestId,
        /// The employee the request was created for.
        expected: EmployeeId,
        /// The employee that was supplied.
        actual: EmployeeId,
    },

    /// A persistence operation was attempted without a data store.
    #[error("No data store is attached to this tracker")]
    StoreNotAttached,

    /// A data file could not be read or written.
    #[error("Storage error on '{path}': {source}")]
    Storage {
        /// The file or directory involved.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A data file was readable but its contents were malformed.
    #[error("Failed to parse data file '{path}': {message}")]
    StorageParse {
        /// The file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Snapshot file names must be non-empty.
    #[error("Snapshot file name cannot be empty")]
    InvalidSnapshotName,

    /// The requested snapshot file does not exist.
    #[error("Snapshot file does not exist: {path}")]
    SnapshotNotFound {
        /// The missing snapshot path.
        path: String,
    },
}

/// A type alias for Results that return TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;
