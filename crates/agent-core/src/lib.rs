//! # dialdesk-agent-core
//!
//! Agent availability tracking for the dialdesk outbound console.
//!
//! This crate owns two things:
//!
//! - the **current agent record** — who is signed in to this console
//!   instance and what their work status is right now, and
//! - the **status interval log** — an append-only, gap-free history of how
//!   long the agent spent in each status, suitable for export to a
//!   reporting sink.
//!
//! It is a leaf crate with no knowledge of calls; the console coordinator
//! drives status transitions alongside call transitions (for example,
//! entering "On Call" when a call connects).
//!
//! # Example
//!
//! ```rust
//! use dialdesk_agent_core::{Agent, AgentRole, AgentStatus, AgentStatusTracker};
//!
//! let tracker = AgentStatusTracker::new();
//! tracker.set_current_agent(Agent::new(
//!     "agent-1",
//!     "Sari Dewi",
//!     "sari@example.com",
//!     AgentRole::Agent,
//! ));
//! tracker.update_status(AgentStatus::Available);
//!
//! let snapshot = tracker.snapshot();
//! assert_eq!(
//!     snapshot.current_agent.as_ref().unwrap().status,
//!     AgentStatus::Available,
//! );
//! assert_eq!(snapshot.status_logs.len(), 1);
//! ```

pub mod agent;
pub mod status_log;
pub mod tracker;

pub use agent::{Agent, AgentRole, AgentStatus};
pub use status_log::{LogEntryId, StatusLogEntry};
pub use tracker::{AgentSnapshot, AgentStatusTracker};
