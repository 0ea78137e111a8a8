//! Sick leave validation.

use crate::models::{Employee, LeaveType};

use super::{LeavePolicy, LeaveRejection};

/// Checks a sick leave request of `days` days against `employee`.
///
/// Requests longer than `policy.sick_certificate_threshold_days` need a
/// medical certificate, and the sick balance must cover the request.
///
/// # Examples
///
/// ```
/// use leave_tracker::models::Employee;
/// use leave_tracker::validation::{check_sick_leave, LeavePolicy};
///
/// let employee = Employee::new(101, "John Doe", "Engineering", 20, 10);
/// let policy = LeavePolicy::default();
///
/// assert!(check_sick_leave(4, false, &employee, &policy).is_err());
/// assert!(check_sick_leave(4, true, &employee, &policy).is_ok());
/// ```
pub fn check_sick_leave(
    days: i32,
    has_medical_certificate: bool,
    employee: &Employee,
    policy: &LeavePolicy,
) -> Result<(), LeaveRejection> {
    if days > policy.sick_certificate_threshold_days && !has_medical_certificate {
        return Err(LeaveRejection::MedicalCertificateRequired {
            requested: days,
            threshold_days: policy.sick_certificate_threshold_days,
        });
    }

    let available = employee.sick_leave_balance();
    if available < days {
        return Err(LeaveRejection::InsufficientBalance {
            leave_type: LeaveType::Sick,
            requested: days,
            available,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee_with_sick(balance: i32) -> Employee {
        Employee::new(101, "John Doe", "Engineering", 20, balance)
    }

    #[test]
    fn test_three_days_needs_no_certificate() {
        let result = check_sick_leave(3, false, &employee_with_sick(10), &LeavePolicy::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_four_days_without_certificate_fails() {
        let result = check_sick_leave(4, false, &employee_with_sick(10), &LeavePolicy::default());
        assert_eq!(
            result,
            Err(LeaveRejection::MedicalCertificateRequired {
                requested: 4,
                threshold_days: 3
            })
        );
    }

    #[test]
    fn test_four_days_with_certificate_passes() {
        let result = check_sick_leave(4, true, &employee_with_sick(10), &LeavePolicy::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_certificate_does_not_bypass_balance() {
        let result = check_sick_leave(6, true, &employee_with_sick(5), &LeavePolicy::default());
        assert_eq!(
            result,
            Err(LeaveRejection::InsufficientBalance {
                leave_type: LeaveType::Sick,
                requested: 6,
                available: 5
            })
        );
    }

    #[test]
    fn test_short_request_still_needs_balance() {
        let result = check_sick_leave(2, false, &employee_with_sick(1), &LeavePolicy::default());
        assert!(matches!(
            result,
            Err(LeaveRejection::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_certificate_rule_is_reported_first() {
        let result = check_sick_leave(8, false, &employee_with_sick(0), &LeavePolicy::default());
        assert!(matches!(
            result,
            Err(LeaveRejection::MedicalCertificateRequired { .. })
        ));
    }
}
