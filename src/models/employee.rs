//! Employee model and leave balance bookkeeping.
//!
//! An [`Employee`] owns its annual and sick leave balances and the ordered
//! list of leave requests that have been decided for it. Requests refer to
//! employees by [`EmployeeId`]; the tracker resolves the id to this record
//! whenever a decision needs to mutate balances.

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

use super::{LeaveType, RequestId};

/// Numeric identifier of an employee.
pub type EmployeeId = u32;

/// Represents an employee who can take leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    department: String,
    annual_leave_balance: i32,
    sick_leave_balance: i32,
    #[serde(default)]
    leave_history: Vec<RequestId>,
}

impl Employee {
    /// Creates an employee with the given starting balances and no history.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_tracker::models::Employee;
    ///
    /// let employee = Employee::new(101, "John Doe", "Engineering", 20, 10);
    /// assert_eq!(employee.annual_leave_balance(), 20);
    /// assert!(employee.leave_history().is_empty());
    /// ```
    pub fn new(
        id: EmployeeId,
        name: impl Into<String>,
        department: impl Into<String>,
        annual_leave_balance: i32,
        sick_leave_balance: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            department: department.into(),
            annual_leave_balance,
            sick_leave_balance,
            leave_history: Vec::new(),
        }
    }

    /// Returns the employee id.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the employee's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the department the employee currently belongs to.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Moves the employee to another department.
    pub fn set_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
    }

    /// Returns the remaining annual leave days.
    pub fn annual_leave_balance(&self) -> i32 {
        self.annual_leave_balance
    }

    /// Overwrites the annual leave balance.
    pub fn set_annual_leave_balance(&mut self, balance: i32) {
        self.annual_leave_balance = balance;
    }

    /// Returns the remaining sick leave days.
    pub fn sick_leave_balance(&self) -> i32 {
        self.sick_leave_balance
    }

    /// Overwrites the sick leave balance.
    pub fn set_sick_leave_balance(&mut self, balance: i32) {
        self.sick_leave_balance = balance;
    }

    /// Returns the ids of decided leave requests, oldest first.
    pub fn leave_history(&self) -> &[RequestId] {
        &self.leave_history
    }

    /// Appends a decided request to the history.
    pub fn add_leave_request(&mut self, request_id: RequestId) {
        self.leave_history.push(request_id);
    }

    /// Subtracts `days` from the balance backing `leave_type`.
    ///
    /// Only annual and sick leave carry a balance. Any other leave type
    /// fails with [`TrackerError::UnsupportedLeaveType`] and leaves both
    /// balances untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_tracker::models::{Employee, LeaveType};
    ///
    /// let mut employee = Employee::new(101, "John Doe", "Engineering", 20, 10);
    /// employee.deduct_leave_days(LeaveType::Sick, 3).unwrap();
    /// assert_eq!(employee.sick_leave_balance(), 7);
    ///
    /// assert!(employee.deduct_leave_days(LeaveType::Unpaid, 1).is_err());
    /// ```
    pub fn deduct_leave_days(&mut self, leave_type: LeaveType, days: i32) -> TrackerResult<()> {
        match leave_type {
            LeaveType::Annual => self.annual_leave_balance -= days,
            LeaveType::Sick => self.sick_leave_balance -= days,
            LeaveType::Maternity | LeaveType::Paternity | LeaveType::Unpaid => {
                return Err(TrackerError::UnsupportedLeaveType { leave_type });
            }
        }
        Ok(())
    }

    /// Renders the console summary block for this employee.
    pub fn summary(&self) -> String {
        format!(
            "Employee ID: {}\nName: {}\nDepartment: {}\n\
             Annual Leave: {} days\nSick Leave: {} days\n",
            self.id, self.name, self.department, self.annual_leave_balance, self.sick_leave_balance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        Employee::new(101, "John Doe", "Engineering", 20, 10)
    }

    #[test]
    fn test_deduct_annual_leave_only_touches_annual_balance() {
        let mut employee = create_test_employee();
        employee.deduct_leave_days(LeaveType::Annual, 5).unwrap();

        assert_eq!(employee.annual_leave_balance(), 15);
        assert_eq!(employee.sick_leave_balance(), 10);
    }

    #[test]
    fn test_deduct_sick_leave_only_touches_sick_balance() {
        let mut employee = create_test_employee();
        employee.deduct_leave_days(LeaveType::Sick, 4).unwrap();

        assert_eq!(employee.annual_leave_balance(), 20);
        assert_eq!(employee.sick_leave_balance(), 6);
    }

    #[test]
    fn test_deduct_can_drive_balance_negative() {
        let mut employee = create_test_employee();
        employee.deduct_leave_days(LeaveType::Sick, 12).unwrap();
        assert_eq!(employee.sick_leave_balance(), -2);
    }

    #[test]
    fn test_deduct_unsupported_types_fail_without_side_effects() {
        for leave_type in [LeaveType::Maternity, LeaveType::Paternity, LeaveType::Unpaid] {
            let mut employee = create_test_employee();
            let result = employee.deduct_leave_days(leave_type, 2);

            match result {
                Err(TrackerError::UnsupportedLeaveType { leave_type: rejected }) => {
                    assert_eq!(rejected, leave_type);
                }
                other => panic!("Expected UnsupportedLeaveType, got {:?}", other),
            }
            assert_eq!(employee, create_test_employee());
        }
    }

    #[test]
    fn test_leave_history_is_append_only_in_order() {
        let mut employee = create_test_employee();
        employee.add_leave_request(3);
        employee.add_leave_request(1);
        employee.add_leave_request(2);

        assert_eq!(employee.leave_history(), &[3, 1, 2]);
    }

    #[test]
    fn test_set_department() {
        let mut employee = create_test_employee();
        employee.set_department("Finance");
        assert_eq!(employee.department(), "Finance");
    }

    #[test]
    fn test_summary_lists_balances() {
        let summary = create_test_employee().summary();
        assert!(summary.contains("Employee ID: 101"));
        assert!(summary.contains("Department: Engineering"));
        assert!(summary.contains("Annual Leave: 20 days"));
        assert!(summary.contains("Sick Leave: 10 days"));
    }

    #[test]
    fn test_deserialize_without_history_defaults_to_empty() {
        let json = r#"{
            "id": 102,
            "name": "Jane Smith",
            "department": "HR",
            "annual_leave_balance": 25,
            "sick_leave_balance": 8
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id(), 102);
        assert_eq!(employee.name(), "Jane Smith");
        assert!(employee.leave_history().is_empty());
    }
}
