//! Request status and the status transition ledger.

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The lifecycle status of a leave request.
///
/// Requests start as [`LeaveStatus::Pending`] and move to exactly one of
/// [`LeaveStatus::Approved`] or [`LeaveStatus::Rejected`]. No operation
/// produces [`LeaveStatus::Cancelled`]; it only appears when restored from
/// persisted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the balance has been deducted.
    Approved,
    /// Rejected.
    Rejected,
    /// Withdrawn.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the upper-case tag used in data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
            LeaveStatus::Cancelled => "CANCELLED",
        }
    }

    /// Returns true for statuses no transition leaves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actor recorded on the creation entry of every ledger.
pub const SYSTEM_ACTOR: &str = "System";

/// One immutable entry in a request's status ledger.
///
/// `from_status` is `None` for the creation entry, rendered as `CREATED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    from_status: Option<LeaveStatus>,
    to_status: LeaveStatus,
    change_date: NaiveDate,
    changed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl StatusChange {
    /// Creates an entry dated today.
    pub fn new(
        from_status: Option<LeaveStatus>,
        to_status: LeaveStatus,
        changed_by: impl Into<String>,
    ) -> Self {
        Self::dated(from_status, to_status, changed_by, Utc::now().date_naive())
    }

    /// Creates an entry with an explicit date.
    pub fn dated(
        from_status: Option<LeaveStatus>,
        to_status: LeaveStatus,
        changed_by: impl Into<String>,
        change_date: NaiveDate,
    ) -> Self {
        Self {
            from_status,
            to_status,
            change_date,
            changed_by: changed_by.into(),
            note: None,
        }
    }

    /// Attaches a free-text note, such as a denial reason.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Status before the change, `None` for creation.
    pub fn from_status(&self) -> Option<LeaveStatus> {
        self.from_status
    }

    /// Status after the change.
    pub fn to_status(&self) -> LeaveStatus {
        self.to_status
    }

    /// Day the change was recorded.
    pub fn change_date(&self) -> NaiveDate {
        self.change_date
    }

    /// Who made the change.
    pub fn changed_by(&self) -> &str {
        &self.changed_by
    }

    /// Optional note attached to the change.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = self.from_status.map_or("CREATED", |status| status.as_str());
        write!(
            f,
            "[{}] {} → {} by {}",
            self.change_date, from, self.to_status, self.changed_by
        )?;
        if let Some(note) = &self.note {
            write!(f, " ({})", note)?;
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

    #[test]
    fn test_creation_entry_renders_created() {
        let change =
            StatusChange::dated(None, LeaveStatus::Pending, SYSTEM_ACTOR, date(2025, 8, 1));
        assert_eq!(change.to_string(), "[2025-08-01] CREATED → PENDING by System");
    }

    #[test]
    fn test_note_is_appended_to_summary() {
        let change = StatusChange::dated(
            Some(LeaveStatus::Pending),
            LeaveStatus::Rejected,
            "HR Manager",
            date(2025, 8, 2),
        )
        .with_note("Invalid request");

        assert_eq!(change.note(), Some("Invalid request"));
        assert_eq!(
            change.to_string(),
            "[2025-08-02] PENDING → REJECTED by HR Manager (Invalid request)"
        );
    }

    #[test]
    fn test_new_is_dated_today() {
        let change = StatusChange::new(None, LeaveStatus::Pending, SYSTEM_ACTOR);
        assert_eq!(change.change_date(), Utc::now().date_naive());
    }

    #[test]
    fn test_only_pending_is_not_terminal() {
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());
        assert!(LeaveStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        let parsed: LeaveStatus = serde_json::from_str("\"APPROVED\"").unwrap();
        assert_eq!(parsed, LeaveStatus::Approved);
    }
}
