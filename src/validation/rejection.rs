//! Reasons a leave request can fail validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::LeaveType;

/// Why a leave request cannot be approved.
///
/// A rejection is an ordinary outcome rather than an error: the request
/// stays pending and the tracker denies it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum LeaveRejection {
    /// The employee does not have enough days left.
    #[error("Insufficient {leave_type} leave balance: {requested} days requested, {available} available")]
    InsufficientBalance {
        /// Balance that was checked.
        leave_type: LeaveType,
        /// Days the request covers.
        requested: i32,
        /// Days left in the balance.
        available: i32,
    },

    /// Annual leave longer than the single-request cap.
    #[error("Annual leave cannot exceed {max_days} days at once ({requested} requested)")]
    ExceedsMaximumDuration {
        /// Days the request covers.
        requested: i32,
        /// The configured cap.
        max_days: i32,
    },

    /// Sick leave over the threshold without a certificate.
    #[error("Medical certificate required for sick leave over {threshold_days} days ({requested} requested)")]
    MedicalCertificateRequired {
        /// Days the request covers.
        requested: i32,
        /// The configured threshold.
        threshold_days: i32,
    },
}
