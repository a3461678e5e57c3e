//! # dialdesk-console
//!
//! Umbrella crate for the dialdesk outbound call-center console core.
//!
//! Re-exports the two core stores and provides [`AgentDesktop`], the
//! composition root that coordinates agent status transitions alongside
//! call transitions. The presentation layer subscribes to each store's
//! watch channel and renders whatever snapshot arrives; all policy (what a
//! dial does to the agent's status, where a completed call drops them)
//! lives here.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use dialdesk_console::{
//!     Agent, AgentDesktop, AgentRole, AgentStatus, AgentStatusTracker,
//!     CallManagerConfig, CallSessionManager,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let desk = AgentDesktop::new(
//!     Arc::new(AgentStatusTracker::new()),
//!     Arc::new(CallSessionManager::new(
//!         CallManagerConfig::default().without_simulated_ringing(),
//!     )),
//! );
//!
//! desk.login(Agent::new("a-1", "Sari", "sari@example.com", AgentRole::Agent));
//! desk.dial("+628123456789", None).await?;
//! desk.answer().await?;
//! desk.hang_up(Some("Interested".into()), None).await?;
//! desk.wrap_up(AgentStatus::Available);
//! # Ok(())
//! # }
//! ```

pub mod desktop;

pub use desktop::AgentDesktop;

pub use dialdesk_agent_core::{
    Agent, AgentRole, AgentSnapshot, AgentStatus, AgentStatusTracker, LogEntryId, StatusLogEntry,
};
pub use dialdesk_call_core::{
    ActiveCall, CallError, CallId, CallManagerConfig, CallResult, CallSessionManager, CallState,
    Lead, LeadStatus, NullTransport, SoftphoneSnapshot, TransportEvent, VoiceTransport,
};
