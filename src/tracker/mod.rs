//! Leave tracking orchestration.
//!
//! This module provides the [`LeaveTrackingSystem`] that registers
//! employees, creates leave requests, drains the pending-approval queue and
//! reports per-department statistics.

mod outcome;
mod stats;
mod system;

pub use outcome::{ApprovalOutcome, INVALID_REQUEST_REASON};
pub use stats::{DepartmentReport, DepartmentStats};
pub use system::LeaveTrackingSystem;
