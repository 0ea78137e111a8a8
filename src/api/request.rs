//! Request and view types for the leave tracker API.
//!
//! This module defines the JSON bodies accepted by the endpoints and the
//! flattened views returned for employees and leave requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, EmployeeId, LeaveRequest, LeaveStatus, LeaveType, RequestId};
use crate::tracker::ApprovalOutcome;

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Unique employee id.
    pub id: EmployeeId,
    /// Employee name.
    pub name: String,
    /// Department name.
    pub department: String,
    /// Starting annual leave balance.
    #[serde(default)]
    pub annual_leave_balance: i32,
    /// Starting sick leave balance.
    #[serde(default)]
    pub sick_leave_balance: i32,
}

impl From<CreateEmployeeRequest> for Employee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Employee::new(
            req.id,
            req.name,
            req.department,
            req.annual_leave_balance,
            req.sick_leave_balance,
        )
    }
}

/// Request body for `POST /leave-requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    /// Employee asking for leave.
    pub employee_id: EmployeeId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Stated reason.
    #[serde(default)]
    pub reason: String,
    /// Leave type tag.
    pub leave_type: LeaveType,
    /// Certificate flag, only meaningful for sick leave.
    #[serde(default)]
    pub has_medical_certificate: bool,
}

/// Request body for `POST /leave-requests/process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Name recorded on every decision.
    pub approver: String,
}

/// Response body for `POST /leave-requests/process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// One entry per decided request, in queue order.
    pub outcomes: Vec<ApprovalOutcome>,
}

/// Flattened view of a leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestView {
    /// Request id.
    pub id: RequestId,
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Inclusive day count.
    pub number_of_days: i32,
    /// Stated reason.
    pub reason: String,
    /// Current status.
    pub status: LeaveStatus,
    /// Leave type tag.
    pub leave_type: LeaveType,
    /// Certificate flag.
    pub has_medical_certificate: bool,
    /// Rendered ledger entries, oldest first.
    pub status_history: Vec<String>,
}

impl From<&LeaveRequest> for LeaveRequestView {
    fn from(request: &LeaveRequest) -> Self {
        Self {
            id: request.id(),
            employee_id: request.employee_id(),
            start_date: request.start_date(),
            end_date: request.end_date(),
            number_of_days: request.number_of_days(),
            reason: request.reason().to_string(),
            status: request.status(),
            leave_type: request.leave_type(),
            has_medical_certificate: request.kind().has_medical_certificate(),
            status_history: request
                .status_history()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
