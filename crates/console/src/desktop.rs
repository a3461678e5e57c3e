//! Agent desktop coordinator.
//!
//! The two core stores know nothing about each other; this is the external
//! caller that keeps them in step. It owns the policy decisions the stores
//! deliberately avoid: a dial puts the agent On Call, a completed call drops
//! them into After-Call Work, and logout tears everything down in order.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use dialdesk_agent_core::{Agent, AgentStatus, AgentStatusTracker};
use dialdesk_call_core::{ActiveCall, CallId, CallResult, CallSessionManager};

/// Wires the agent status tracker and call session manager together for one
/// console instance
///
/// Holds both stores behind `Arc` so the presentation layer can subscribe to
/// each independently while the desktop drives the coordinated transitions.
pub struct AgentDesktop {
    agents: Arc<AgentStatusTracker>,
    calls: Arc<CallSessionManager>,
}

impl AgentDesktop {
    pub fn new(agents: Arc<AgentStatusTracker>, calls: Arc<CallSessionManager>) -> Self {
        Self { agents, calls }
    }

    /// The agent status store.
    pub fn agents(&self) -> &Arc<AgentStatusTracker> {
        &self.agents
    }

    /// The call session store.
    pub fn calls(&self) -> &Arc<CallSessionManager> {
        &self.calls
    }

    /// Sign an agent in: stamp the login time, make them current, and open
    /// the initial `Available` interval.
    ///
    /// `set_current_agent` deliberately logs nothing, so the desktop records
    /// the first interval itself via the status transition.
    pub fn login(&self, agent: Agent) {
        let now = Utc::now();
        self.agents.set_current_agent(agent.with_login_time(now));
        self.agents.update_status(AgentStatus::Available);
    }

    /// Dial a number and mark the agent On Call.
    ///
    /// On any dial error the agent's status is left untouched.
    pub async fn dial(&self, number: &str, lead_id: Option<String>) -> CallResult<CallId> {
        let call_id = self.calls.start_call(number, lead_id).await?;
        self.agents.update_status(AgentStatus::OnCall);
        Ok(call_id)
    }

    /// Answer the active call; ensures the agent shows On Call.
    pub async fn answer(&self) -> CallResult<()> {
        self.calls.accept_call().await?;
        let on_call = self
            .agents
            .snapshot()
            .current_agent
            .as_ref()
            .map(|agent| agent.status == AgentStatus::OnCall)
            .unwrap_or(false);
        if !on_call {
            self.agents.update_status(AgentStatus::OnCall);
        }
        Ok(())
    }

    /// End the active call with its disposition, dropping the agent into
    /// After-Call Work.
    pub async fn hang_up(
        &self,
        disposition: Option<String>,
        notes: Option<String>,
    ) -> CallResult<ActiveCall> {
        let completed = self.calls.end_call(disposition, notes).await?;
        self.agents.update_status(AgentStatus::Acw);
        info!(call_id = %completed.id, "wrap-up started");
        Ok(completed)
    }

    /// Leave After-Call Work for the chosen status.
    pub fn wrap_up(&self, next: AgentStatus) {
        self.agents.update_status(next);
    }

    /// Sign the agent out: end any live call first, then close the status
    /// log and clear the agent.
    pub async fn logout(&self) {
        if self.calls.snapshot().active_call.is_some() {
            debug!("logout with live call, ending it first");
            let _ = self.calls.end_call(None, None).await;
        }
        self.agents.logout();
    }
}
