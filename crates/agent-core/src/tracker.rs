//! The agent status store.
//!
//! `AgentStatusTracker` is the single source of truth for "who is signed in
//! and what are they doing", plus a gap-free history of status intervals.
//! State is published as immutable snapshots: every mutation builds a new
//! `AgentSnapshot`, swaps it in under the lock, and broadcasts it on a watch
//! channel, so observers can never see the agent's status field and the open
//! log entry disagree.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::agent::{Agent, AgentStatus};
use crate::status_log::StatusLogEntry;

/// Immutable view of the tracker state
///
/// `status_logs` is ordered oldest-first; at most one entry is open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The signed-in agent, if any
    pub current_agent: Option<Agent>,
    /// Complete status interval history, oldest-first
    pub status_logs: Vec<StatusLogEntry>,
}

impl AgentSnapshot {
    /// The open (unclosed) status interval, if one exists.
    pub fn open_log(&self) -> Option<&StatusLogEntry> {
        self.status_logs.iter().find(|log| log.is_open())
    }
}

/// Tracks the current agent and their status interval log
///
/// Explicitly constructible so independent instances can coexist; whatever
/// composition root wires up the console owns it, typically behind an `Arc`.
pub struct AgentStatusTracker {
    snapshot: RwLock<Arc<AgentSnapshot>>,
    watch_tx: watch::Sender<Arc<AgentSnapshot>>,
}

impl AgentStatusTracker {
    /// Create an empty tracker with no agent signed in.
    pub fn new() -> Self {
        let initial = Arc::new(AgentSnapshot::default());
        let (watch_tx, _) = watch::channel(initial.clone());
        Self {
            snapshot: RwLock::new(initial),
            watch_tx,
        }
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> Arc<AgentSnapshot> {
        self.snapshot.read().clone()
    }

    /// Subscribe to state changes; each transition delivers the full new
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<AgentSnapshot>> {
        self.watch_tx.subscribe()
    }

    /// Replace the current agent record wholesale (used at login).
    ///
    /// No log entry is created implicitly; callers that want the initial
    /// interval recorded should follow up with [`log_status`] or
    /// [`update_status`].
    ///
    /// [`log_status`]: AgentStatusTracker::log_status
    /// [`update_status`]: AgentStatusTracker::update_status
    pub fn set_current_agent(&self, agent: Agent) -> Arc<AgentSnapshot> {
        info!(agent_id = %agent.id, name = %agent.name, "agent signed in");
        self.mutate(|state| {
            state.current_agent = Some(agent);
        })
    }

    /// Transition the current agent to `new_status`.
    ///
    /// Closes any open log entry at the transition instant, opens a new one
    /// for `new_status`, and updates the agent record, all in one published
    /// snapshot. Returns the unchanged snapshot if no agent is signed in.
    pub fn update_status(&self, new_status: AgentStatus) -> Arc<AgentSnapshot> {
        let now = Utc::now();
        let current = self.snapshot.read().clone();
        let Some(agent) = current.current_agent.as_ref() else {
            debug!(status = %new_status, "status change ignored, no agent signed in");
            return current;
        };
        let agent_id = agent.id.clone();

        info!(agent_id = %agent_id, status = %new_status, "agent status change");
        self.mutate(|state| {
            close_open_logs(&mut state.status_logs, now);
            state
                .status_logs
                .push(StatusLogEntry::open(agent_id.clone(), new_status, now));
            if let Some(agent) = state.current_agent.as_mut() {
                agent.status = new_status;
                agent.last_status_change = Some(now);
            }
        })
    }

    /// Append a pre-built log entry without touching the agent record.
    ///
    /// Used by callers that record the initial login interval themselves.
    pub fn log_status(&self, entry: StatusLogEntry) -> Arc<AgentSnapshot> {
        debug!(agent_id = %entry.agent_id, status = %entry.status, "status log appended");
        self.mutate(|state| {
            state.status_logs.push(entry);
        })
    }

    /// Sign the current agent out.
    ///
    /// Closes the open log entry exactly as a status change would, then
    /// clears the agent. The interval history is retained for reporting.
    pub fn logout(&self) -> Arc<AgentSnapshot> {
        let now = Utc::now();
        if let Some(agent) = self.snapshot.read().current_agent.as_ref() {
            info!(agent_id = %agent.id, "agent signed out");
        }
        self.mutate(|state| {
            close_open_logs(&mut state.status_logs, now);
            state.current_agent = None;
        })
    }

    /// Copy-on-write mutation: clone the published snapshot, apply `f`, swap
    /// the result in, and notify subscribers. The write lock is held across
    /// the swap so transitions serialize.
    fn mutate(&self, f: impl FnOnce(&mut AgentSnapshot)) -> Arc<AgentSnapshot> {
        let mut guard = self.snapshot.write();
        let mut next = (**guard).clone();
        f(&mut next);
        let next = Arc::new(next);
        *guard = next.clone();
        drop(guard);
        let _ = self.watch_tx.send(next.clone());
        next
    }
}

fn close_open_logs(logs: &mut [StatusLogEntry], at: DateTime<Utc>) {
    for log in logs.iter_mut().filter(|log| log.is_open()) {
        log.close(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRole;

    fn signed_in_tracker() -> AgentStatusTracker {
        let tracker = AgentStatusTracker::new();
        tracker.set_current_agent(
            Agent::new("agent-1", "Sari Dewi", "sari@example.com", AgentRole::Agent)
                .with_login_time(Utc::now()),
        );
        tracker
    }

    #[test]
    fn set_current_agent_does_not_log() {
        let tracker = signed_in_tracker();
        let snap = tracker.snapshot();
        assert!(snap.current_agent.is_some());
        assert!(snap.status_logs.is_empty());
    }

    #[test]
    fn update_status_without_agent_is_noop() {
        let tracker = AgentStatusTracker::new();
        let snap = tracker.update_status(AgentStatus::Available);
        assert!(snap.current_agent.is_none());
        assert!(snap.status_logs.is_empty());
    }

    #[test]
    fn update_status_closes_previous_interval() {
        let tracker = signed_in_tracker();
        tracker.update_status(AgentStatus::Available);
        tracker.update_status(AgentStatus::Break);

        let snap = tracker.snapshot();
        assert_eq!(snap.status_logs.len(), 2);
        assert!(!snap.status_logs[0].is_open());
        assert!(snap.status_logs[1].is_open());
        assert_eq!(snap.status_logs[1].status, AgentStatus::Break);
        assert_eq!(
            snap.current_agent.as_ref().unwrap().status,
            AgentStatus::Break
        );
    }

    #[test]
    fn agent_field_and_open_log_always_agree() {
        let tracker = signed_in_tracker();
        for status in [
            AgentStatus::Available,
            AgentStatus::OnCall,
            AgentStatus::Acw,
            AgentStatus::Available,
        ] {
            let snap = tracker.update_status(status);
            let open = snap.open_log().expect("one open interval");
            assert_eq!(open.status, snap.current_agent.as_ref().unwrap().status);
        }
    }

    #[test]
    fn rapid_transitions_produce_non_overlapping_intervals() {
        let tracker = signed_in_tracker();
        tracker.update_status(AgentStatus::Break);
        tracker.update_status(AgentStatus::Available);
        tracker.update_status(AgentStatus::Break);

        let snap = tracker.snapshot();
        assert_eq!(snap.status_logs.len(), 3);
        for pair in snap.status_logs.windows(2) {
            let closed = &pair[0];
            assert!(closed.duration_ms.unwrap() >= 0);
            assert!(closed.end_time.unwrap() <= pair[1].start_time);
        }
        assert_eq!(snap.status_logs[0].status, AgentStatus::Break);
        assert_eq!(snap.status_logs[1].status, AgentStatus::Available);
        assert_eq!(snap.status_logs[2].status, AgentStatus::Break);
    }

    #[test]
    fn log_status_appends_without_touching_the_agent() {
        let tracker = signed_in_tracker();
        let imported = StatusLogEntry::open("agent-1", AgentStatus::Break, Utc::now());
        let snap = tracker.log_status(imported);

        assert_eq!(snap.status_logs.len(), 1);
        // The agent record is untouched; only a transition updates it.
        assert_eq!(
            snap.current_agent.as_ref().unwrap().status,
            AgentStatus::Offline
        );
    }

    #[test]
    fn logout_leaves_no_open_entries_and_keeps_history() {
        let tracker = signed_in_tracker();
        tracker.update_status(AgentStatus::Available);
        tracker.update_status(AgentStatus::Acw);
        let snap = tracker.logout();

        assert!(snap.current_agent.is_none());
        assert_eq!(snap.status_logs.len(), 2);
        assert!(snap.status_logs.iter().all(|log| !log.is_open()));
    }

    #[tokio::test]
    async fn subscribers_receive_full_snapshots() {
        let tracker = signed_in_tracker();
        let mut rx = tracker.subscribe();

        tracker.update_status(AgentStatus::Available);
        rx.changed().await.unwrap();
        let snap = rx.borrow_and_update().clone();
        assert_eq!(
            snap.current_agent.as_ref().unwrap().status,
            AgentStatus::Available
        );
        assert_eq!(snap.status_logs.len(), 1);
    }
}
