//! Append-only status interval log.
//!
//! Each entry records one contiguous interval an agent spent in a single
//! status. Entries are created open (no `end_time`) and are closed by the
//! next status transition or by logout; they are never deleted, which is
//! what makes the log usable for occupancy reporting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentStatus;

/// Unique identifier for a status log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogEntryId(pub uuid::Uuid);

impl LogEntryId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for LogEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One interval an agent spent in a single status
///
/// At most one entry per agent is open (`end_time` unset) at any time.
/// `duration_ms` is derived when the entry is closed and is `end_time -
/// start_time` in milliseconds; zero-duration intervals are legal when two
/// transitions land on the same instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusLogEntry {
    /// Unique entry identifier
    pub id: LogEntryId,
    /// Agent the interval belongs to (non-owning foreign key)
    pub agent_id: String,
    /// Status held during the interval
    pub status: AgentStatus,
    /// When the interval began
    pub start_time: DateTime<Utc>,
    /// When the interval ended; unset while the interval is open
    pub end_time: Option<DateTime<Utc>>,
    /// Interval length in milliseconds, set when the entry is closed
    pub duration_ms: Option<i64>,
}

impl StatusLogEntry {
    /// Open a new interval starting at `start_time`.
    pub fn open(agent_id: impl Into<String>, status: AgentStatus, start_time: DateTime<Utc>) -> Self {
        Self {
            id: LogEntryId::new(),
            agent_id: agent_id.into(),
            status,
            start_time,
            end_time: None,
            duration_ms: None,
        }
    }

    /// Whether the interval is still open.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Close the interval at `at`, deriving its duration.
    pub(crate) fn close(&mut self, at: DateTime<Utc>) {
        self.end_time = Some(at);
        self.duration_ms = Some((at - self.start_time).num_milliseconds());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn close_derives_duration() {
        let start = Utc::now();
        let mut entry = StatusLogEntry::open("agent-1", AgentStatus::Break, start);
        assert!(entry.is_open());

        entry.close(start + Duration::milliseconds(1500));
        assert!(!entry.is_open());
        assert_eq!(entry.duration_ms, Some(1500));
    }

    #[test]
    fn zero_duration_interval_is_legal() {
        let start = Utc::now();
        let mut entry = StatusLogEntry::open("agent-1", AgentStatus::Available, start);
        entry.close(start);
        assert_eq!(entry.duration_ms, Some(0));
    }
}
