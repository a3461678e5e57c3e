//! Agent identity and availability types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to a console user
///
/// Roles are resolved and enforced by the directory/permission layer;
/// the tracker only carries the label so reporting rows are self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    /// Regular outbound agent
    Agent,
    /// Team supervisor (wallboard access)
    Supervisor,
    /// Platform administrator
    Admin,
}

/// Work status of an agent
///
/// Every status change opens a new interval in the status log, so the
/// variants double as the reporting dimension for occupancy accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    /// Logged in and ready to take or place calls
    Available,
    /// Actively on a call
    #[serde(rename = "On Call")]
    OnCall,
    /// After-Call Work: wrapping up the previous call (notes, disposition)
    #[serde(rename = "ACW")]
    Acw,
    /// On a scheduled or unscheduled break
    Break,
    /// Logged out or otherwise unreachable
    Offline,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AgentStatus::Available => "Available",
            AgentStatus::OnCall => "On Call",
            AgentStatus::Acw => "ACW",
            AgentStatus::Break => "Break",
            AgentStatus::Offline => "Offline",
        };
        write!(f, "{}", label)
    }
}

/// The agent currently signed in to this console instance
///
/// Exactly one agent is "current" at a time; `status` always reflects the
/// most recent transition recorded by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Directory identifier for the agent (non-owning foreign key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Work email address
    pub email: String,
    /// Assigned role
    pub role: AgentRole,
    /// Current work status
    pub status: AgentStatus,
    /// When the agent signed in, if known
    pub login_time: Option<DateTime<Utc>>,
    /// When `status` last changed
    pub last_status_change: Option<DateTime<Utc>>,
}

impl Agent {
    /// Build an agent record for login, starting `Offline` until the first
    /// status transition is recorded.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: AgentRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            status: AgentStatus::Offline,
            login_time: None,
            last_status_change: None,
        }
    }

    /// Stamp the login time, builder-style.
    pub fn with_login_time(mut self, at: DateTime<Utc>) -> Self {
        self.login_time = Some(at);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_wallboard() {
        assert_eq!(AgentStatus::OnCall.to_string(), "On Call");
        assert_eq!(AgentStatus::Acw.to_string(), "ACW");
        assert_eq!(AgentStatus::Available.to_string(), "Available");
    }

    #[test]
    fn status_serializes_with_display_labels() {
        let json = serde_json::to_string(&AgentStatus::OnCall).unwrap();
        assert_eq!(json, "\"On Call\"");
        let back: AgentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AgentStatus::OnCall);
    }
}
