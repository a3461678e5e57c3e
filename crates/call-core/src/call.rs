//! Call data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub uuid::Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a call on the line
///
/// Legal progression is `Idle → Connecting → Ringing → Connected → Ending`
/// and back to no active call; `Connecting → Connected` is also legal when
/// the far end answers before ringing is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallState {
    /// No call on the line
    Idle,
    /// Dial requested, waiting for the transport to make progress
    Connecting,
    /// Far end is being alerted
    Ringing,
    /// Media is up, both parties connected
    Connected,
    /// Teardown in progress
    Ending,
}

impl std::fmt::Display for CallState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CallState::Idle => "idle",
            CallState::Connecting => "connecting",
            CallState::Ringing => "ringing",
            CallState::Connected => "connected",
            CallState::Ending => "ending",
        };
        write!(f, "{}", label)
    }
}

/// A call occupying (or having occupied) the line
///
/// While active, this is the live record in the session manager's single
/// call slot. On completion the same record, with `end_time`, `duration_ms`,
/// disposition and notes filled in, moves into the call history where it
/// doubles as the CDR row for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveCall {
    /// Unique call identifier
    pub id: CallId,
    /// Lead being dialed, if the call came from a campaign list
    /// (non-owning foreign key)
    pub lead_id: Option<String>,
    /// Dialed number in E.164 form
    pub phone_number: String,
    /// Outbound caller ID presented, if one was selected from the pool
    pub caller_id_used: Option<String>,
    /// When the dial was requested
    pub start_time: Option<DateTime<Utc>>,
    /// When the far end answered; unset for calls that never connected
    pub answer_time: Option<DateTime<Utc>>,
    /// When the call ended
    pub end_time: Option<DateTime<Utc>>,
    /// Talk time in milliseconds; only meaningful once `answer_time` is set,
    /// and zero for calls that never connected
    pub duration_ms: i64,
    /// Current lifecycle state
    pub state: CallState,
    /// Whether the microphone is muted
    pub muted: bool,
    /// Whether the call is on hold
    pub on_hold: bool,
    /// Agent-assigned outcome label, attached at completion
    pub disposition: Option<String>,
    /// Free-form agent notes, attached at completion
    pub notes: Option<String>,
}

impl ActiveCall {
    /// Build a fresh call record in `Connecting`, as created by a dial
    /// request.
    pub fn dialing(
        phone_number: impl Into<String>,
        lead_id: Option<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CallId::new(),
            lead_id,
            phone_number: phone_number.into(),
            caller_id_used: None,
            start_time: Some(start_time),
            answer_time: None,
            end_time: None,
            duration_ms: 0,
            state: CallState::Connecting,
            muted: false,
            on_hold: false,
            disposition: None,
            notes: None,
        }
    }

    /// Whether the call was ever answered.
    pub fn was_answered(&self) -> bool {
        self.answer_time.is_some()
    }
}
