//! Flat-file persistence for the leave tracker.
//!
//! Employees and leave requests are kept in two CSV files, with dated
//! backup copies and an optional JSON snapshot of the full state.

mod records;
mod snapshot;
mod store;

pub use records::{EMPLOYEE_HEADERS, EmployeeRecord, LeaveRequestRecord, REQUEST_HEADERS};
pub use snapshot::Snapshot;
pub use store::{BackupFiles, DataStore};
