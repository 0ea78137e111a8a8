//! Numeric thresholds used by the validation rules.

use serde::{Deserialize, Serialize};

/// Longest annual leave request, in days, that may be approved at once.
pub const DEFAULT_ANNUAL_MAX_DAYS: i32 = 14;

/// Longest sick leave request, in days, that needs no medical certificate.
pub const DEFAULT_SICK_CERTIFICATE_THRESHOLD_DAYS: i32 = 3;

/// Thresholds applied when validating leave requests.
///
/// Missing fields fall back to the defaults when deserialized.
///
/// # Example
///
/// ```
/// use leave_tracker::validation::LeavePolicy;
///
/// let policy = LeavePolicy::default();
/// assert_eq!(policy.annual_max_days, 14);
/// assert_eq!(policy.sick_certificate_threshold_days, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeavePolicy {
    /// Single-request cap for annual leave.
    pub annual_max_days: i32,
    /// Sick leave longer than this requires a medical certificate.
    pub sick_certificate_threshold_days: i32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            annual_max_days: DEFAULT_ANNUAL_MAX_DAYS,
            sick_certificate_threshold_days: DEFAULT_SICK_CERTIFICATE_THRESHOLD_DAYS,
        }
    }
}
