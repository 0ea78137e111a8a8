//! Flat records written to and read from the CSV data files.
//!
//! Requests are rebuilt from their records without replaying any decision:
//! the persisted status is restored directly and the ledger only holds the
//! creation entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::models::{
    Employee, EmployeeId, LeaveKind, LeaveRequest, LeaveStatus, LeaveType, RequestId,
};

/// Header row of the employees file.
pub const EMPLOYEE_HEADERS: [&str; 5] = ["ID", "Name", "Department", "AnnualLeave", "SickLeave"];

/// Header row of the leave requests file.
pub const REQUEST_HEADERS: [&str; 8] = [
    "RequestID",
    "EmployeeID",
    "StartDate",
    "EndDate",
    "Reason",
    "Status",
    "Type",
    "MedicalCertificate",
];

/// One row of the employees file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee id.
    #[serde(rename = "ID")]
    pub employee_id: EmployeeId,
    /// Employee name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Department name.
    #[serde(rename = "Department")]
    pub department: String,
    /// Remaining annual leave days.
    #[serde(rename = "AnnualLeave")]
    pub annual_leave_balance: i32,
    /// Remaining sick leave days.
    #[serde(rename = "SickLeave")]
    pub sick_leave_balance: i32,
}

impl From<&Employee> for EmployeeRecord {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id(),
            name: employee.name().to_string(),
            department: employee.department().to_string(),
            annual_leave_balance: employee.annual_leave_balance(),
            sick_leave_balance: employee.sick_leave_balance(),
        }
    }
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        Employee::new(
            record.employee_id,
            record.name,
            record.department,
            record.annual_leave_balance,
            record.sick_leave_balance,
        )
    }
}

/// One row of the leave requests file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequestRecord {
    /// Request id.
    #[serde(rename = "RequestID")]
    pub request_id: RequestId,
    /// Owning employee id.
    #[serde(rename = "EmployeeID")]
    pub employee_id: EmployeeId,
    /// First day of leave.
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDate,
    /// Last day of leave.
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDate,
    /// Stated reason.
    #[serde(rename = "Reason")]
    pub reason: String,
    /// Status at the time of saving.
    #[serde(rename = "Status")]
    pub status: LeaveStatus,
    /// Leave type tag.
    #[serde(rename = "Type")]
    pub leave_type: LeaveType,
    /// Certificate flag; false for non-sick leave.
    #[serde(rename = "MedicalCertificate")]
    pub has_medical_certificate: bool,
}

impl From<&LeaveRequest> for LeaveRequestRecord {
    fn from(request: &LeaveRequest) -> Self {
        Self {
            request_id: request.id(),
            employee_id: request.employee_id(),
            start_date: request.start_date(),
            end_date: request.end_date(),
            reason: request.reason().to_string(),
            status: request.status(),
            leave_type: request.leave_type(),
            has_medical_certificate: request.kind().has_medical_certificate(),
        }
    }
}

impl TryFrom<LeaveRequestRecord> for LeaveRequest {
    type Error = TrackerError;

    fn try_from(record: LeaveRequestRecord) -> Result<Self, Self::Error> {
        let kind = LeaveKind::for_type(record.leave_type, record.has_medical_certificate)?;
        let mut request = LeaveRequest::new(
            record.request_id,
            record.employee_id,
            record.start_date,
            record.end_date,
            record.reason,
            kind,
        );
        request.restore_status(record.status);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(status: LeaveStatus) -> LeaveRequestRecord {
        LeaveRequestRecord {
            request_id: 7,
            employee_id: 101,
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
            reason: "Flu, then recovery".to_string(),
            status,
            leave_type: LeaveType::Sick,
            has_medical_certificate: true,
        }
    }

    #[test]
    fn test_reconstructed_request_reserializes_identically() {
        for status in [
            LeaveStatus::Pending,
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
            LeaveStatus::Cancelled,
        ] {
            let record = sample_record(status);
            let request = LeaveRequest::try_from(record.clone()).unwrap();
            assert_eq!(LeaveRequestRecord::from(&request), record);
        }
    }

    #[test]
    fn test_reconstruction_does_not_replay_decisions() {
        let request = LeaveRequest::try_from(sample_record(LeaveStatus::Approved)).unwrap();

        assert_eq!(request.status(), LeaveStatus::Approved);
        assert_eq!(request.status_history().len(), 1);
        assert_eq!(request.status_history()[0].to_status(), LeaveStatus::Pending);
    }

    #[test]
    fn test_unsupported_type_cannot_be_reconstructed() {
        let mut record = sample_record(LeaveStatus::Pending);
        record.leave_type = LeaveType::Paternity;

        assert!(matches!(
            LeaveRequest::try_from(record),
            Err(TrackerError::UnsupportedLeaveType {
                leave_type: LeaveType::Paternity
            })
        ));
    }

    #[test]
    fn test_employee_record_drops_history() {
        let mut employee = Employee::new(101, "John Doe", "Engineering", 20, 10);
        employee.add_leave_request(1);

        let restored = Employee::from(EmployeeRecord::from(&employee));
        assert_eq!(restored.id(), 101);
        assert_eq!(restored.annual_leave_balance(), 20);
        assert!(restored.leave_history().is_empty());
    }
}
