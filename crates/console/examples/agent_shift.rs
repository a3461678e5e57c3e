//! Walk one agent through a short shift: login, a dialed and dispositioned
//! call, wrap-up, logout. Prints the status interval log and the CDR row at
//! the end.
//!
//! ```bash
//! RUST_LOG=debug cargo run --example agent_shift
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use dialdesk_console::{
    Agent, AgentDesktop, AgentRole, AgentStatus, AgentStatusTracker, CallManagerConfig,
    CallSessionManager,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let desk = AgentDesktop::new(
        Arc::new(AgentStatusTracker::new()),
        Arc::new(CallSessionManager::new(
            CallManagerConfig::default().with_ring_delay(Duration::from_millis(300)),
        )),
    );

    desk.login(Agent::new(
        "agent-1",
        "Sari Dewi",
        "sari@example.com",
        AgentRole::Agent,
    ));
    desk.calls().set_online(true);

    desk.dial("+628123456789", Some("lead-1".into())).await?;
    tokio::time::sleep(Duration::from_millis(400)).await; // ringing fires
    desk.answer().await?;
    tokio::time::sleep(Duration::from_millis(700)).await; // talk time

    let completed = desk
        .hang_up(Some("Interested".into()), Some("wants a callback next week".into()))
        .await?;
    println!(
        "CDR: {} -> {} ({} ms, disposition {:?})",
        completed.id,
        completed.phone_number,
        completed.duration_ms,
        completed.disposition,
    );

    desk.wrap_up(AgentStatus::Available);
    desk.logout().await;

    println!("\nStatus intervals:");
    for log in desk.agents().snapshot().status_logs.iter() {
        println!(
            "  {:<10} {:>6} ms",
            log.status.to_string(),
            log.duration_ms.unwrap_or(0),
        );
    }
    Ok(())
}
