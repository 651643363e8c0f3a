//! Log record kinds and the filters the cleanup and notifier issue against them.
//!
//! Records are owned by the surrounding application; this crate never builds or
//! reads a full record, so the kinds are zero-sized markers carrying only the
//! storage metadata a repository needs.

use chrono::{DateTime, TimeDelta, Utc};

/// Storage metadata for a kind of log record.
pub trait Record: Send + Sync + 'static {
    /// Short name used in logs and metrics labels.
    const KIND: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    /// Column holding the timestamp age filters compare against.
    const CREATED_COLUMN: &'static str = "created_at";
    /// Boolean columns that may appear in a [`Filter::Flag`].
    const FLAG_COLUMNS: &'static [&'static str] = &[];
}

/// An application error captured for later review.
#[derive(Debug, Clone, Copy)]
pub struct ErrorLog;

impl Record for ErrorLog {
    const KIND: &'static str = "error_log";
    const TABLE: &'static str = "error_logs";
    const FLAG_COLUMNS: &'static [&'static str] = &["seen"];
}

impl ErrorLog {
    /// Filter matching error logs nobody has looked at yet.
    pub fn unseen() -> Filter {
        Filter::Flag {
            column: "seen",
            value: false,
        }
    }
}

/// A user activity entry (logins, document changes, ...).
#[derive(Debug, Clone, Copy)]
pub struct ActivityLog;

impl Record for ActivityLog {
    const KIND: &'static str = "activity_log";
    const TABLE: &'static str = "activity_logs";
}

/// An outgoing email waiting in (or already processed by) the send queue.
#[derive(Debug, Clone, Copy)]
pub struct EmailQueueEntry;

impl Record for EmailQueueEntry {
    const KIND: &'static str = "email_queue";
    const TABLE: &'static str = "email_queue";
    // Queue entries are aged by their last status change, not creation.
    const CREATED_COLUMN: &'static str = "modified_at";
}

/// 0001-01-01T00:00:00Z, the earliest cutoff that still encodes as RFC 3339.
const EARLIEST_CUTOFF_SECS: i64 = -62_135_596_800;

fn earliest_cutoff() -> DateTime<Utc> {
    DateTime::from_timestamp(EARLIEST_CUTOFF_SECS, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Predicate over a record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Records whose age column is strictly before the cutoff.
    CreatedBefore(DateTime<Utc>),
    /// Records whose boolean column equals `value`.
    Flag { column: &'static str, value: bool },
}

impl Filter {
    /// Records older than `days` days, measured from now.
    pub fn older_than_days(days: u32) -> Self {
        Self::older_than_days_from(Utc::now(), days)
    }

    /// Records older than `days` days, measured from `now`.
    ///
    /// Cutoffs earlier than 0001-01-01 are floored there; no stored record can
    /// be older.
    pub fn older_than_days_from(now: DateTime<Utc>, days: u32) -> Self {
        let floor = earliest_cutoff();
        let cutoff = TimeDelta::try_days(i64::from(days))
            .and_then(|delta| now.checked_sub_signed(delta))
            .filter(|cutoff| *cutoff >= floor)
            .unwrap_or(floor);
        Filter::CreatedBefore(cutoff)
    }

    /// Check that the filter only names columns the record kind exposes.
    pub fn validate_for<R: Record>(&self) -> Result<(), String> {
        match self {
            Filter::CreatedBefore(_) => Ok(()),
            Filter::Flag { column, .. } if R::FLAG_COLUMNS.contains(column) => Ok(()),
            Filter::Flag { column, .. } => Err(format!(
                "'{}' is not a filterable column of {}",
                column,
                R::TABLE
            )),
        }
    }
}
