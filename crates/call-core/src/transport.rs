//! Voice transport seam.
//!
//! The session manager is transport-agnostic: it issues commands through the
//! [`VoiceTransport`] trait and is driven by [`TransportEvent`]s the adapter
//! feeds back in. A real adapter wraps a SIP/WebRTC provider SDK; tests and
//! the simulated desktop use [`NullTransport`].

use async_trait::async_trait;

use crate::call::CallId;
use crate::error::CallResult;

/// Commands the session manager issues to the telephony provider
///
/// Implementations translate these into provider SDK calls. Failures are
/// surfaced as [`CallError::Transport`](crate::error::CallError::Transport);
/// the manager decides how each failure affects the local call record.
#[async_trait]
pub trait VoiceTransport: Send + Sync {
    /// Place an outbound call to `phone_number`.
    async fn dial(&self, call_id: CallId, phone_number: &str) -> CallResult<()>;

    /// Accept the call (answer on behalf of the local party).
    async fn accept(&self, call_id: CallId) -> CallResult<()>;

    /// Tear the call down.
    async fn hangup(&self, call_id: CallId) -> CallResult<()>;

    /// Mute or unmute the local microphone.
    async fn set_muted(&self, call_id: CallId, muted: bool) -> CallResult<()>;

    /// Place the call on or off hold.
    async fn set_hold(&self, call_id: CallId, on_hold: bool) -> CallResult<()>;
}

/// Progress notifications the transport feeds back to the session manager
///
/// Every event names the call it belongs to; the manager discards events
/// whose call no longer occupies the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The far end is being alerted
    Ringing { call_id: CallId },
    /// The far end answered
    Answered { call_id: CallId },
    /// The far end hung up
    RemoteHangup { call_id: CallId },
    /// The transport gave up on the call
    Failed { call_id: CallId, reason: String },
}

impl TransportEvent {
    /// The call this event targets.
    pub fn call_id(&self) -> CallId {
        match self {
            TransportEvent::Ringing { call_id }
            | TransportEvent::Answered { call_id }
            | TransportEvent::RemoteHangup { call_id }
            | TransportEvent::Failed { call_id, .. } => *call_id,
        }
    }
}

/// Transport that accepts every command and does nothing
///
/// Stands in for a provider SDK in tests and demos; call progress is then
/// driven by the manager's simulated ringing transition and by events the
/// test injects directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

#[async_trait]
impl VoiceTransport for NullTransport {
    async fn dial(&self, _call_id: CallId, _phone_number: &str) -> CallResult<()> {
        Ok(())
    }

    async fn accept(&self, _call_id: CallId) -> CallResult<()> {
        Ok(())
    }

    async fn hangup(&self, _call_id: CallId) -> CallResult<()> {
        Ok(())
    }

    async fn set_muted(&self, _call_id: CallId, _muted: bool) -> CallResult<()> {
        Ok(())
    }

    async fn set_hold(&self, _call_id: CallId, _on_hold: bool) -> CallResult<()> {
        Ok(())
    }
}
