//! Core data models for the leave tracker.
//!
//! This module contains the employee record, the leave request state
//! machine and the status ledger entries it keeps.

mod employee;
mod leave_request;
mod leave_type;
mod status;

pub use employee::{Employee, EmployeeId};
pub use leave_request::{LeaveRequest, RequestId};
pub use leave_type::{LeaveKind, LeaveType};
pub use status::{LeaveStatus, SYSTEM_ACTOR, StatusChange};
