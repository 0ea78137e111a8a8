//! Leave type tags and the closed set of request kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// The category of leave an employee can ask for.
///
/// Only [`LeaveType::Annual`] and [`LeaveType::Sick`] are backed by a
/// [`LeaveKind`] and a balance. The remaining tags are recognised so that
/// persisted data and callers can name them, but every operation that needs
/// a kind or a balance rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// Paid annual leave.
    Annual,
    /// Paid sick leave.
    Sick,
    /// Maternity leave.
    Maternity,
    /// Paternity leave.
    Paternity,
    /// Unpaid leave.
    Unpaid,
}

impl LeaveType {
    /// Returns the upper-case tag used in data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "ANNUAL",
            LeaveType::Sick => "SICK",
            LeaveType::Maternity => "MATERNITY",
            LeaveType::Paternity => "PATERNITY",
            LeaveType::Unpaid => "UNPAID",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a leave request together with its kind-specific data.
///
/// The kind is fixed when the request is constructed.
///
/// # Example
///
/// ```
/// use leave_tracker::models::{LeaveKind, LeaveType};
///
/// let kind = LeaveKind::for_type(LeaveType::Sick, true).unwrap();
/// assert_eq!(kind.leave_type(), LeaveType::Sick);
/// assert!(kind.has_medical_certificate());
///
/// assert!(LeaveKind::for_type(LeaveType::Maternity, false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "leave_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveKind {
    /// Annual leave.
    Annual,
    /// Sick leave, optionally backed by a medical certificate.
    Sick {
        /// Whether a medical certificate was supplied.
        has_medical_certificate: bool,
    },
}

impl LeaveKind {
    /// Builds the kind matching `leave_type`.
    ///
    /// The certificate flag is only kept for sick leave. Leave types
    /// without a request kind fail with [`TrackerError::UnsupportedLeaveType`].
    pub fn for_type(leave_type: LeaveType, has_medical_certificate: bool) -> TrackerResult<Self> {
        match leave_type {
            LeaveType::Annual => Ok(LeaveKind::Annual),
            LeaveType::Sick => Ok(LeaveKind::Sick {
                has_medical_certificate,
            }),
            LeaveType::Maternity | LeaveType::Paternity | LeaveType::Unpaid => {
                Err(TrackerError::UnsupportedLeaveType { leave_type })
            }
        }
    }

    /// Returns the leave type tag for this kind.
    pub fn leave_type(&self) -> LeaveType {
        match self {
            LeaveKind::Annual => LeaveType::Annual,
            LeaveKind::Sick { .. } => LeaveType::Sick,
        }
    }

    /// Returns the certificate flag; always false for non-sick kinds.
    pub fn has_medical_certificate(&self) -> bool {
        match self {
            LeaveKind::Annual => false,
            LeaveKind::Sick {
                has_medical_certificate,
            } => *has_medical_certificate,
        }
    }
}
