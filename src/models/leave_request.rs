//! The leave request state machine.
//!
//! A [`LeaveRequest`] is created [`LeaveStatus::Pending`] and decided once,
//! either by [`LeaveRequest::approve`] or [`LeaveRequest::deny`]. Every
//! transition, including creation, is appended to the request's status
//! ledger. Requests hold the id of their employee; callers pass the
//! matching [`Employee`] whenever a decision touches balances or history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::validation::{LeavePolicy, LeaveRejection, check_annual_leave, check_sick_leave};

use super::{Employee, EmployeeId, LeaveKind, LeaveStatus, LeaveType, SYSTEM_ACTOR, StatusChange};

/// Numeric identifier of a leave request.
pub type RequestId = u32;

/// A dated request by an employee to consume leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    id: RequestId,
    employee_id: EmployeeId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    status: LeaveStatus,
    kind: LeaveKind,
    status_history: Vec<StatusChange>,
}

impl LeaveRequest {
    /// Creates a pending request and records its creation in the ledger.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_tracker::models::{LeaveKind, LeaveRequest, LeaveStatus};
    /// use chrono::NaiveDate;
    ///
    /// let request = LeaveRequest::new(
    ///     1,
    ///     101,
    ///     NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 8, 5).unwrap(),
    ///     "Family trip",
    ///     LeaveKind::Annual,
    /// );
    ///
    /// assert_eq!(request.status(), LeaveStatus::Pending);
    /// assert_eq!(request.number_of_days(), 5);
    /// assert_eq!(request.status_history().len(), 1);
    /// ```
    pub fn new(
        id: RequestId,
        employee_id: EmployeeId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
        kind: LeaveKind,
    ) -> Self {
        let mut request = Self {
            id,
            employee_id,
            start_date,
            end_date,
            reason: reason.into(),
            status: LeaveStatus::Pending,
            kind,
            status_history: Vec::new(),
        };
        request.record_status_change(None, LeaveStatus::Pending, SYSTEM_ACTOR);
        request
    }

    /// Returns the request id.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the id of the employee the request belongs to.
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// First day of leave.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of leave.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The employee's stated reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Current status.
    pub fn status(&self) -> LeaveStatus {
        self.status
    }

    /// The request kind.
    pub fn kind(&self) -> LeaveKind {
        self.kind
    }

    /// The leave type tag of the request kind.
    pub fn leave_type(&self) -> LeaveType {
        self.kind.leave_type()
    }

    /// The status ledger, oldest entry first. Never empty.
    pub fn status_history(&self) -> &[StatusChange] {
        &self.status_history
    }

    /// Inclusive number of days between the start and end dates.
    ///
    /// Both ends are counted. An end date before the start date counts as
    /// zero days.
    pub fn number_of_days(&self) -> i32 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        i32::try_from(days.max(0)).unwrap_or(i32::MAX)
    }

    /// Runs the validation rule for this request's kind.
    pub fn validate(
        &self,
        employee: &Employee,
        policy: &LeavePolicy,
    ) -> Result<(), LeaveRejection> {
        let days = self.number_of_days();
        match self.kind {
            LeaveKind::Annual => check_annual_leave(days, employee, policy),
            LeaveKind::Sick {
                has_medical_certificate,
            } => check_sick_leave(days, has_medical_certificate, employee, policy),
        }
    }

    /// Returns whether the request passes validation.
    ///
    /// A failing rule is logged at debug level; nothing is mutated.
    pub fn is_valid(&self, employee: &Employee, policy: &LeavePolicy) -> bool {
        match self.validate(employee, policy) {
            Ok(()) => true,
            Err(rejection) => {
                debug!(
                    request_id = self.id,
                    employee_id = self.employee_id,
                    reason = %rejection,
                    "Leave request failed validation"
                );
                false
            }
        }
    }

    /// Appends a ledger entry dated today.
    pub fn record_status_change(
        &mut self,
        from_status: Option<LeaveStatus>,
        to_status: LeaveStatus,
        changed_by: impl Into<String>,
    ) {
        self.status_history
            .push(StatusChange::new(from_status, to_status, changed_by));
    }

    /// Approves the request on behalf of `approver`.
    ///
    /// Returns `Ok(false)` with no side effects when the request is no
    /// longer pending or fails validation. On success the status moves to
    /// [`LeaveStatus::Approved`], the matching balance is reduced by
    /// [`number_of_days`](Self::number_of_days), the request is appended
    /// to the employee's history and one ledger entry is recorded.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::EmployeeMismatch`] when `employee` is not
    /// the request's employee.
    pub fn approve(
        &mut self,
        employee: &mut Employee,
        approver: &str,
        policy: &LeavePolicy,
    ) -> TrackerResult<bool> {
        self.ensure_owner(employee)?;

        if self.status.is_terminal() {
            warn!(
                request_id = self.id,
                status = %self.status,
                "Ignoring approval of an already decided leave request"
            );
            return Ok(false);
        }

        if !self.is_valid(employee, policy) {
            return Ok(false);
        }

        employee.deduct_leave_days(self.leave_type(), self.number_of_days())?;
        let previous = self.status;
        self.record_status_change(Some(previous), LeaveStatus::Approved, approver);
        self.status = LeaveStatus::Approved;
        employee.add_leave_request(self.id);
        Ok(true)
    }

    /// Rejects the request on behalf of `approver`.
    ///
    /// A pending request always transitions to [`LeaveStatus::Rejected`]
    /// and is appended to the employee's history. The reason is stored as
    /// the note of the new ledger entry. Returns `Ok(false)` with no side
    /// effects when the request is already decided.
    ///
    /// # Errors
    ///
    /// Fails with [`TrackerError::EmployeeMismatch`] when `employee` is not
    /// the request's employee.
    pub fn deny(
        &mut self,
        employee: &mut Employee,
        approver: &str,
        reason: &str,
    ) -> TrackerResult<bool> {
        self.ensure_owner(employee)?;

        if self.status.is_terminal() {
            warn!(
                request_id = self.id,
                status = %self.status,
                "Ignoring denial of an already decided leave request"
            );
            return Ok(false);
        }

        let change = StatusChange::new(Some(self.status), LeaveStatus::Rejected, approver)
            .with_note(reason);
        self.status_history.push(change);
        self.status = LeaveStatus::Rejected;
        employee.add_leave_request(self.id);
        Ok(true)
    }

    /// Overwrites the status without touching the ledger.
    ///
    /// Used when rebuilding requests from persisted records, where the
    /// recorded decision must not be replayed.
    pub fn restore_status(&mut self, status: LeaveStatus) {
        self.status = status;
    }

    /// Renders the console detail block for this request.
    pub fn summary(&self, employee: &Employee) -> String {
        format!(
            "Request ID: {}\nEmployee: {} (ID: {})\nLeave Type: {}\n\
             Dates: {} to {} ({} days)\nStatus: {}\nReason: {}\n",
            self.id,
            employee.name(),
            employee.id(),
            self.leave_type(),
            self.start_date,
            self.end_date,
            self.number_of_days(),
            self.status,
            self.reason
        )
    }

    /// Renders the status ledger, one line per entry.
    pub fn status_history_report(&self) -> String {
        let mut report = format!("Status History for Request #{}\n", self.id);
        for change in &self.status_history {
            report.push_str(&change.to_string());
            report.push('\n');
        }
        report
    }

    fn ensure_owner(&self, employee: &Employee) -> TrackerResult<()> {
        if employee.id() != self.employee_id {
            return Err(TrackerError::EmployeeMismatch {
                request_id: self.id,
                expected: self.employee_id,
                actual: employee.id(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee::new(101, "John Doe", "Engineering", 20, 10)
    }

    fn annual_request(days: i64) -> LeaveRequest {
        let start = date(2025, 8, 1);
        LeaveRequest::new(
            1,
            101,
            start,
            start + chrono::Duration::days(days - 1),
            "Vacation",
            LeaveKind::Annual,
        )
    }

    fn sick_request(days: i64, has_medical_certificate: bool) -> LeaveRequest {
        let start = date(2025, 8, 1);
        LeaveRequest::new(
            2,
            101,
            start,
            start + chrono::Duration::days(days - 1),
            "Flu",
            LeaveKind::Sick {
                has_medical_certificate,
            },
        )
    }

    #[test]
    fn test_number_of_days_is_inclusive() {
        let request = LeaveRequest::new(
            1,
            101,
            date(2025, 8, 1),
            date(2025, 8, 5),
            "Trip",
            LeaveKind::Annual,
        );
        assert_eq!(request.number_of_days(), 5);
    }

    #[test]
    fn test_single_day_request_counts_one() {
        let request = LeaveRequest::new(
            1,
            101,
            date(2025, 8, 1),
            date(2025, 8, 1),
            "Appointment",
            LeaveKind::Annual,
        );
        assert_eq!(request.number_of_days(), 1);
    }

    #[test]
    fn test_inverted_range_counts_zero() {
        let request = LeaveRequest::new(
            1,
            101,
            date(2025, 8, 5),
            date(2025, 8, 1),
            "Typo",
            LeaveKind::Annual,
        );
        assert_eq!(request.number_of_days(), 0);
    }

    #[test]
    fn test_range_across_month_end() {
        let request = LeaveRequest::new(
            1,
            101,
            date(2024, 2, 27),
            date(2024, 3, 2),
            "Leap year",
            LeaveKind::Annual,
        );
        assert_eq!(request.number_of_days(), 5);
    }

    #[test]
    fn test_creation_records_system_entry() {
        let request = annual_request(3);
        let history = request.status_history();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].from_status(), None);
        assert_eq!(history[0].to_status(), LeaveStatus::Pending);
        assert_eq!(history[0].changed_by(), SYSTEM_ACTOR);
    }

    #[test]
    fn test_approve_valid_request_deducts_and_records_once() {
        let mut employee = create_test_employee();
        let mut request = annual_request(5);

        let approved = request
            .approve(&mut employee, "HR Manager", &LeavePolicy::default())
            .unwrap();

        assert!(approved);
        assert_eq!(request.status(), LeaveStatus::Approved);
        assert_eq!(employee.annual_leave_balance(), 15);
        assert_eq!(employee.sick_leave_balance(), 10);
        assert_eq!(employee.leave_history(), &[1]);

        let history = request.status_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].from_status(), Some(LeaveStatus::Pending));
        assert_eq!(history[1].to_status(), LeaveStatus::Approved);
        assert_eq!(history[1].changed_by(), "HR Manager");
    }

    #[test]
    fn test_approve_invalid_request_is_a_no_op() {
        let mut employee = create_test_employee();
        let mut request = annual_request(15);

        let approved = request
            .approve(&mut employee, "HR Manager", &LeavePolicy::default())
            .unwrap();

        assert!(!approved);
        assert_eq!(request.status(), LeaveStatus::Pending);
        assert_eq!(employee, create_test_employee());
        assert_eq!(request.status_history().len(), 1);
    }

    #[test]
    fn test_approve_sick_request_deducts_sick_balance() {
        let mut employee = create_test_employee();
        let mut request = sick_request(4, true);

        assert!(request
            .approve(&mut employee, "HR Manager", &LeavePolicy::default())
            .unwrap());
        assert_eq!(employee.sick_leave_balance(), 6);
        assert_eq!(employee.annual_leave_balance(), 20);
    }

    #[test]
    fn test_sick_request_without_certificate_is_invalid() {
        let employee = create_test_employee();
        let policy = LeavePolicy::default();

        assert!(!sick_request(4, false).is_valid(&employee, &policy));
        assert!(sick_request(4, true).is_valid(&employee, &policy));
    }

    #[test]
    fn test_second_approval_does_not_deduct_twice() {
        let mut employee = create_test_employee();
        let mut request = annual_request(5);
        let policy = LeavePolicy::default();

        assert!(request.approve(&mut employee, "HR Manager", &policy).unwrap());
        assert!(!request.approve(&mut employee, "HR Manager", &policy).unwrap());

        assert_eq!(employee.annual_leave_balance(), 15);
        assert_eq!(employee.leave_history().len(), 1);
        assert_eq!(request.status_history().len(), 2);
    }

    #[test]
    fn test_deny_always_rejects_and_stores_reason() {
        let mut employee = create_test_employee();
        let mut request = annual_request(5);

        let denied = request
            .deny(&mut employee, "HR Manager", "Team at capacity")
            .unwrap();

        assert!(denied);
        assert_eq!(request.status(), LeaveStatus::Rejected);
        assert_eq!(employee.annual_leave_balance(), 20);
        assert_eq!(employee.leave_history(), &[1]);

        let last = request.status_history().last().unwrap();
        assert_eq!(last.to_status(), LeaveStatus::Rejected);
        assert_eq!(last.changed_by(), "HR Manager");
        assert_eq!(last.note(), Some("Team at capacity"));
    }

    #[test]
    fn test_deny_after_approval_changes_nothing() {
        let mut employee = create_test_employee();
        let mut request = annual_request(8);
        let policy = LeavePolicy::default();
        assert!(request.approve(&mut employee, "HR Manager", &policy).unwrap());

        let denied = request
            .deny(&mut employee, "HR Manager", "Invalid request")
            .unwrap();

        assert!(!denied);
        assert_eq!(request.status(), LeaveStatus::Approved);
        assert_eq!(employee.annual_leave_balance(), 12);
        assert_eq!(employee.leave_history(), &[1]);
        assert_eq!(request.status_history().len(), 2);
    }

    #[test]
    fn test_decisions_reject_foreign_employee() {
        let mut other = Employee::new(102, "Jane Smith", "HR", 25, 8);
        let mut request = annual_request(2);

        let result = request.approve(&mut other, "HR Manager", &LeavePolicy::default());
        assert!(matches!(
            result,
            Err(TrackerError::EmployeeMismatch {
                request_id: 1,
                expected: 101,
                actual: 102
            })
        ));
        assert!(request.deny(&mut other, "HR Manager", "n/a").is_err());
        assert_eq!(request.status(), LeaveStatus::Pending);
        assert_eq!(other.annual_leave_balance(), 25);
    }

    #[test]
    fn test_restore_status_bypasses_ledger() {
        let mut request = annual_request(2);
        request.restore_status(LeaveStatus::Cancelled);

        assert_eq!(request.status(), LeaveStatus::Cancelled);
        assert_eq!(request.status_history().len(), 1);
    }

    #[test]
    fn test_summary_and_history_report() {
        let employee = create_test_employee();
        let request = annual_request(5);

        let summary = request.summary(&employee);
        assert!(summary.contains("Request ID: 1"));
        assert!(summary.contains("Employee: John Doe (ID: 101)"));
        assert!(summary.contains("Leave Type: ANNUAL"));
        assert!(summary.contains("Dates: 2025-08-01 to 2025-08-05 (5 days)"));
        assert!(summary.contains("Status: PENDING"));

        let report = request.status_history_report();
        assert!(report.starts_with("Status History for Request #1\n"));
        assert!(report.contains("CREATED → PENDING by System"));
    }

    #[test]
    fn test_request_serialization_round_trip() {
        let mut employee = create_test_employee();
        let mut request = sick_request(2, false);
        request
            .deny(&mut employee, "HR Manager", "Invalid request")
            .unwrap();

        let json = serde_json::to_string(&request).unwrap();
        let restored: LeaveRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, request);
    }
}
