//! Results of batch approval.

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeId, LeaveStatus, RequestId};
use crate::validation::LeaveRejection;

/// Reason recorded when batch processing denies an invalid request.
pub const INVALID_REQUEST_REASON: &str = "Invalid request";

/// The decision taken for one request while draining the pending queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    /// The decided request.
    pub request_id: RequestId,
    /// Its employee.
    pub employee_id: EmployeeId,
    /// Status after the decision.
    pub status: LeaveStatus,
    /// The failed rule, for denied requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<LeaveRejection>,
}

impl ApprovalOutcome {
    /// Returns true if the request was approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }
}
