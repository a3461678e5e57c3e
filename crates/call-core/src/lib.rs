//! # dialdesk-call-core
//!
//! Outbound call session lifecycle for the dialdesk console.
//!
//! This crate owns the single call line of an agent desktop: one
//! [`ActiveCall`] at most, progressing `connecting → ringing → connected →
//! ending`, plus the most-recent-first history of completed calls. The
//! telephony provider sits behind the [`VoiceTransport`] trait and drives
//! the state machine with [`TransportEvent`]s; the manager itself never
//! touches SIP or WebRTC.
//!
//! Agent status is deliberately out of this crate: the console coordinator
//! listens to call transitions and drives
//! [`dialdesk-agent-core`](https://docs.rs/dialdesk-agent-core) alongside.
//!
//! # Example
//!
//! ```rust
//! use dialdesk_call_core::{CallManagerConfig, CallSessionManager};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = CallSessionManager::new(
//!     CallManagerConfig::default().without_simulated_ringing(),
//! );
//!
//! manager.start_call("+628123456789", Some("lead-1".into())).await?;
//! manager.accept_call().await?;
//! let completed = manager
//!     .end_call(Some("Interested".into()), Some("follow up".into()))
//!     .await?;
//!
//! assert_eq!(completed.disposition.as_deref(), Some("Interested"));
//! assert!(manager.snapshot().active_call.is_none());
//! # Ok(())
//! # }
//! ```

pub mod call;
pub mod config;
pub mod error;
pub mod lead;
pub mod manager;
pub mod transport;

pub use call::{ActiveCall, CallId, CallState};
pub use config::CallManagerConfig;
pub use error::{CallError, CallResult};
pub use lead::{Lead, LeadStatus};
pub use manager::{CallSessionManager, SoftphoneSnapshot};
pub use transport::{NullTransport, TransportEvent, VoiceTransport};
