//! Annual leave validation.

use crate::models::{Employee, LeaveType};

use super::{LeavePolicy, LeaveRejection};

/// Checks an annual leave request of `days` days against `employee`.
///
/// Two independent caps apply, checked in this order:
/// - the employee's annual balance must cover the request
/// - the request may not exceed `policy.annual_max_days`
///
/// # Examples
///
/// ```
/// use leave_tracker::models::Employee;
/// use leave_tracker::validation::{check_annual_leave, LeavePolicy, LeaveRejection};
///
/// let employee = Employee::new(101, "John Doe", "Engineering", 20, 10);
/// let policy = LeavePolicy::default();
///
/// assert!(check_annual_leave(14, &employee, &policy).is_ok());
/// assert_eq!(
///     check_annual_leave(15, &employee, &policy),
///     Err(LeaveRejection::ExceedsMaximumDuration { requested: 15, max_days: 14 })
/// );
/// ```
pub fn check_annual_leave(
    days: i32,
    employee: &Employee,
    policy: &LeavePolicy,
) -> Result<(), LeaveRejection> {
    let available = employee.annual_leave_balance();
    if available < days {
        return Err(LeaveRejection::InsufficientBalance {
            leave_type: LeaveType::Annual,
            requested: days,
            available,
        });
    }

    if days > policy.annual_max_days {
        return Err(LeaveRejection::ExceedsMaximumDuration {
            requested: days,
            max_days: policy.annual_max_days,
        });
    }

    Ok(())
}
