//! Whole-state snapshot written as a single JSON document.

use serde::{Deserialize, Serialize};

use crate::models::{Employee, LeaveRequest, RequestId};

/// Everything needed to rebuild a tracker, including leave histories and
/// status ledgers that the CSV files do not carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// All registered employees.
    pub employees: Vec<Employee>,
    /// All leave requests.
    pub requests: Vec<LeaveRequest>,
    /// Id the next created request will receive.
    pub next_request_id: RequestId,
}
