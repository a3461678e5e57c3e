//! Integration tests for status interval accounting.
//!
//! The reporting contract is that the interval log is contiguous: closed
//! durations plus the open interval's elapsed time account for all wall
//! time since tracking began, with no gaps and no overlaps.

use chrono::Utc;
use dialdesk_agent_core::{Agent, AgentRole, AgentStatus, AgentStatusTracker};
use std::time::Duration;

fn login(tracker: &AgentStatusTracker) {
    tracker.set_current_agent(
        Agent::new("agent-7", "Budi Santoso", "budi@example.com", AgentRole::Agent)
            .with_login_time(Utc::now()),
    );
}

#[test]
fn interval_log_is_contiguous_and_complete() {
    let tracker = AgentStatusTracker::new();
    login(&tracker);

    tracker.update_status(AgentStatus::Available);
    std::thread::sleep(Duration::from_millis(30));
    tracker.update_status(AgentStatus::OnCall);
    std::thread::sleep(Duration::from_millis(30));
    tracker.update_status(AgentStatus::Acw);
    std::thread::sleep(Duration::from_millis(30));
    tracker.update_status(AgentStatus::Available);

    let now = Utc::now();
    let snap = tracker.snapshot();
    assert_eq!(snap.status_logs.len(), 4);

    // No gaps: each interval ends exactly where the next begins.
    for pair in snap.status_logs.windows(2) {
        assert_eq!(pair[0].end_time.unwrap(), pair[1].start_time);
    }

    // Closed durations plus open elapsed cover the whole tracked span.
    let closed: i64 = snap
        .status_logs
        .iter()
        .filter_map(|log| log.duration_ms)
        .sum();
    let open = snap.open_log().expect("one open interval");
    let open_elapsed = (now - open.start_time).num_milliseconds();
    let tracked_span = (now - snap.status_logs[0].start_time).num_milliseconds();
    assert_eq!(closed + open_elapsed, tracked_span);
}

#[test]
fn same_instant_transitions_keep_order_and_non_negative_durations() {
    let tracker = AgentStatusTracker::new();
    login(&tracker);

    // Back-to-back flips, likely within the same millisecond.
    tracker.update_status(AgentStatus::Break);
    tracker.update_status(AgentStatus::Available);
    tracker.update_status(AgentStatus::Break);
    tracker.update_status(AgentStatus::Available);

    let snap = tracker.snapshot();
    assert_eq!(snap.status_logs.len(), 4);
    let statuses: Vec<_> = snap.status_logs.iter().map(|log| log.status).collect();
    assert_eq!(
        statuses,
        vec![
            AgentStatus::Break,
            AgentStatus::Available,
            AgentStatus::Break,
            AgentStatus::Available,
        ]
    );
    for log in &snap.status_logs[..3] {
        assert!(log.duration_ms.unwrap() >= 0);
        assert!(log.end_time.unwrap() >= log.start_time);
    }
}

#[test]
fn logout_closes_everything_and_retains_history() {
    let tracker = AgentStatusTracker::new();
    login(&tracker);
    tracker.update_status(AgentStatus::Available);
    std::thread::sleep(Duration::from_millis(20));

    let snap = tracker.logout();
    assert!(snap.current_agent.is_none());
    assert_eq!(snap.status_logs.len(), 1);
    let log = &snap.status_logs[0];
    assert!(!log.is_open());
    assert!(log.duration_ms.unwrap() >= 20);

    // A fresh login starts tracking again without disturbing old intervals.
    login(&tracker);
    tracker.update_status(AgentStatus::Available);
    let snap = tracker.snapshot();
    assert_eq!(snap.status_logs.len(), 2);
    assert!(!snap.status_logs[0].is_open());
    assert!(snap.status_logs[1].is_open());
}

#[test]
fn status_log_rows_export_as_json() {
    let tracker = AgentStatusTracker::new();
    login(&tracker);
    tracker.update_status(AgentStatus::OnCall);
    tracker.update_status(AgentStatus::Acw);

    let snap = tracker.snapshot();
    let json = serde_json::to_string(&snap.status_logs).unwrap();
    assert!(json.contains("\"On Call\""));
    assert!(json.contains("\"ACW\""));
}
