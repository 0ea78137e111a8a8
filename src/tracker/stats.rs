//! Department statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pending request count for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStats {
    /// Department name.
    pub department: String,
    /// Requests still awaiting a decision.
    pub pending_requests: usize,
}

/// Pending counts for every known department, sorted by name.
///
/// # Example
///
/// ```
/// use leave_tracker::tracker::{DepartmentReport, DepartmentStats};
///
/// let report = DepartmentReport {
///     departments: vec![DepartmentStats {
///         department: "HR".to_string(),
///         pending_requests: 2,
///     }],
/// };
/// assert_eq!(report.to_string(), "Department Statistics:\nHR: 2 pending requests\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DepartmentReport {
    /// One entry per department.
    pub departments: Vec<DepartmentStats>,
}

impl DepartmentReport {
    /// Returns the pending count for `department`, if it is known.
    pub fn pending_for(&self, department: &str) -> Option<usize> {
        self.departments
            .iter()
            .find(|stats| stats.department == department)
            .map(|stats| stats.pending_requests)
    }
}

impl fmt::Display for DepartmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Department Statistics:")?;
        for stats in &self.departments {
            writeln!(f, "{}: {} pending requests", stats.department, stats.pending_requests)?;
        }
        Ok(())
    }
}
