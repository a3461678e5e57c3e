//! The call session store.
//!
//! `CallSessionManager` models one outbound call's progress from dial to
//! disposition on a single-line agent desktop: at most one call occupies the
//! line, completed calls accumulate in a most-recent-first history, and
//! every mutation publishes a fresh immutable snapshot on a watch channel.
//!
//! Call progress normally arrives as [`TransportEvent`]s from the voice
//! transport adapter. The `connecting → ringing` step can additionally be
//! simulated by a scheduled task (see
//! [`CallManagerConfig::ring_delay`](crate::CallManagerConfig)); the task is
//! cancellable and the fired transition re-checks the call it targets, so a
//! call that was ended first is never resurrected.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::call::{ActiveCall, CallId, CallState};
use crate::config::CallManagerConfig;
use crate::error::{CallError, CallResult};
use crate::lead::Lead;
use crate::transport::{NullTransport, TransportEvent, VoiceTransport};

/// Immutable view of the softphone state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoftphoneSnapshot {
    /// Whether the softphone is registered with the voice provider
    pub online: bool,
    /// The call currently occupying the line, if any
    pub active_call: Option<ActiveCall>,
    /// Completed calls, most recent first
    pub call_history: Vec<ActiveCall>,
    /// Lead the agent is currently working (non-owning lookup)
    pub current_lead: Option<Lead>,
}

/// Pending simulated ringing transition for one call
struct RingTask {
    call_id: CallId,
    handle: JoinHandle<()>,
}

/// State shared with the scheduled ringing task
struct Shared {
    snapshot: RwLock<Arc<SoftphoneSnapshot>>,
    ring_task: Mutex<Option<RingTask>>,
    watch_tx: watch::Sender<Arc<SoftphoneSnapshot>>,
}

impl Shared {
    /// Copy-on-write mutation: clone, apply, swap, notify.
    fn mutate(&self, f: impl FnOnce(&mut SoftphoneSnapshot)) -> Arc<SoftphoneSnapshot> {
        let mut guard = self.snapshot.write();
        let mut next = (**guard).clone();
        f(&mut next);
        let next = Arc::new(next);
        *guard = next.clone();
        drop(guard);
        let _ = self.watch_tx.send(next.clone());
        next
    }

    /// Fallible mutation; nothing is swapped or published on error.
    fn try_mutate<T>(
        &self,
        f: impl FnOnce(&mut SoftphoneSnapshot) -> CallResult<T>,
    ) -> CallResult<T> {
        let mut guard = self.snapshot.write();
        let mut next = (**guard).clone();
        let value = f(&mut next)?;
        let next = Arc::new(next);
        *guard = next.clone();
        drop(guard);
        let _ = self.watch_tx.send(next);
        Ok(value)
    }

    /// Abort whichever simulated ringing task is pending.
    fn cancel_pending_ring(&self) {
        if let Some(task) = self.ring_task.lock().take() {
            debug!(call_id = %task.call_id, "pending ring transition cancelled");
            task.handle.abort();
        }
    }

    /// `connecting → ringing`, but only if `call_id` still occupies the
    /// line in `Connecting`. Stale transitions are silently discarded.
    fn apply_ringing(&self, call_id: CallId) {
        let still_connecting = matches!(
            self.snapshot.read().active_call.as_ref(),
            Some(call) if call.id == call_id && call.state == CallState::Connecting
        );
        if !still_connecting {
            debug!(%call_id, "stale ringing transition discarded");
            return;
        }
        info!(%call_id, "call ringing");
        self.mutate(|state| {
            if let Some(call) = state.active_call.as_mut() {
                if call.id == call_id && call.state == CallState::Connecting {
                    call.state = CallState::Ringing;
                }
            }
        });
    }

    /// Mark the active call connected, stamping `answer_time`, if `call_id`
    /// still occupies the line and is not already connected.
    fn apply_answered(&self, call_id: CallId) {
        self.cancel_pending_ring();
        let answerable = matches!(
            self.snapshot.read().active_call.as_ref(),
            Some(call)
                if call.id == call_id
                    && matches!(call.state, CallState::Connecting | CallState::Ringing)
        );
        if !answerable {
            debug!(%call_id, "stale answer discarded");
            return;
        }
        info!(%call_id, "call connected");
        self.mutate(|state| {
            if let Some(call) = state.active_call.as_mut() {
                if call.id == call_id {
                    call.answer_time = Some(Utc::now());
                    call.state = CallState::Connected;
                }
            }
        });
    }

    /// Complete the active call: stamp `end_time`, derive the billable
    /// duration, attach disposition and notes, prepend to history, and clear
    /// the line, all in one published snapshot.
    ///
    /// With `expected = Some(id)` the completion only applies if that call
    /// still occupies the line (used for transport-driven teardown);
    /// `None` completes whatever is active. Returns the completed record.
    fn complete_active(
        &self,
        expected: Option<CallId>,
        disposition: Option<String>,
        notes: Option<String>,
    ) -> Option<ActiveCall> {
        self.cancel_pending_ring();
        let mut guard = self.snapshot.write();
        match guard.active_call.as_ref() {
            Some(call) if expected.map_or(true, |id| id == call.id) => {}
            _ => return None,
        }

        let mut next = (**guard).clone();
        let Some(mut call) = next.active_call.take() else {
            return None;
        };
        let end_time = Utc::now();
        call.end_time = Some(end_time);
        call.duration_ms = call
            .answer_time
            .map(|answered| (end_time - answered).num_milliseconds())
            .unwrap_or(0);
        call.state = CallState::Idle;
        call.disposition = disposition;
        call.notes = notes;
        next.call_history.insert(0, call.clone());

        let next = Arc::new(next);
        *guard = next.clone();
        drop(guard);
        let _ = self.watch_tx.send(next);
        Some(call)
    }
}

/// Owns the single call line of an agent desktop
///
/// Explicitly constructible; independent instances are cheap and isolated,
/// which is how the tests exercise many lifecycles in parallel.
pub struct CallSessionManager {
    shared: Arc<Shared>,
    transport: Arc<dyn VoiceTransport>,
    config: CallManagerConfig,
}

impl CallSessionManager {
    /// Create a manager with the default (no-op) transport.
    pub fn new(config: CallManagerConfig) -> Self {
        Self::with_transport(config, Arc::new(NullTransport))
    }

    /// Create a manager backed by a real voice transport adapter.
    pub fn with_transport(config: CallManagerConfig, transport: Arc<dyn VoiceTransport>) -> Self {
        let initial = Arc::new(SoftphoneSnapshot::default());
        let (watch_tx, _) = watch::channel(initial.clone());
        Self {
            shared: Arc::new(Shared {
                snapshot: RwLock::new(initial),
                ring_task: Mutex::new(None),
                watch_tx,
            }),
            transport,
            config,
        }
    }

    /// Current state snapshot.
    pub fn snapshot(&self) -> Arc<SoftphoneSnapshot> {
        self.shared.snapshot.read().clone()
    }

    /// Subscribe to state changes; each transition delivers the full new
    /// snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SoftphoneSnapshot>> {
        self.shared.watch_tx.subscribe()
    }

    /// Place an outbound call.
    ///
    /// Creates the call in `Connecting` with a fresh id, asks the transport
    /// to dial, and schedules the simulated ringing transition if one is
    /// configured.
    ///
    /// # Errors
    ///
    /// * [`CallError::InvalidInput`] - `phone_number` is empty
    /// * [`CallError::LineBusy`] - a call already occupies the line
    /// * [`CallError::Transport`] - the transport refused the dial; the
    ///   call is completed into history with zero duration
    pub async fn start_call(
        &self,
        phone_number: impl Into<String>,
        lead_id: Option<String>,
    ) -> CallResult<CallId> {
        let phone_number = phone_number.into();
        if phone_number.trim().is_empty() {
            return Err(CallError::invalid_input("phone number is empty"));
        }

        let call = self.shared.try_mutate(|state| {
            if state.active_call.is_some() {
                return Err(CallError::LineBusy);
            }
            let call = ActiveCall::dialing(phone_number.clone(), lead_id.clone(), Utc::now());
            state.active_call = Some(call.clone());
            Ok(call)
        })?;

        info!(call_id = %call.id, number = %call.phone_number, "dialing");
        self.schedule_ring(call.id);

        if let Err(err) = self.transport.dial(call.id, &call.phone_number).await {
            warn!(call_id = %call.id, error = %err, "dial rejected by transport");
            self.shared.complete_active(Some(call.id), None, None);
            return Err(err);
        }
        Ok(call.id)
    }

    /// Answer the active call, stamping `answer_time` and entering
    /// `Connected`.
    ///
    /// # Errors
    ///
    /// * [`CallError::NoActiveCall`] - no call occupies the line
    pub async fn accept_call(&self) -> CallResult<()> {
        self.shared.cancel_pending_ring();
        let call_id = self.shared.try_mutate(|state| {
            let call = state
                .active_call
                .as_mut()
                .ok_or(CallError::no_active_call("accept"))?;
            call.answer_time = Some(Utc::now());
            call.state = CallState::Connected;
            Ok(call.id)
        })?;

        info!(%call_id, "call connected");
        if let Err(err) = self.transport.accept(call_id).await {
            warn!(%call_id, error = %err, "transport accept failed");
        }
        Ok(())
    }

    /// End the active call with an optional disposition and notes.
    ///
    /// The completed record gets `duration_ms = end_time - answer_time` if
    /// the call was answered, else zero, and is prepended to the history.
    /// Any pending simulated ringing transition is cancelled.
    ///
    /// # Errors
    ///
    /// * [`CallError::NoActiveCall`] - no call occupies the line
    pub async fn end_call(
        &self,
        disposition: Option<String>,
        notes: Option<String>,
    ) -> CallResult<ActiveCall> {
        let completed = self
            .shared
            .complete_active(None, disposition, notes)
            .ok_or(CallError::no_active_call("end"))?;

        info!(
            call_id = %completed.id,
            duration_ms = completed.duration_ms,
            disposition = completed.disposition.as_deref().unwrap_or("-"),
            "call completed"
        );
        if let Err(err) = self.transport.hangup(completed.id).await {
            warn!(call_id = %completed.id, error = %err, "transport hangup failed");
        }
        Ok(completed)
    }

    /// Toggle the microphone mute flag.
    ///
    /// A deliberate no-op when no call is active, so the UI control is safe
    /// to invoke unconditionally.
    pub async fn mute_call(&self) -> Arc<SoftphoneSnapshot> {
        if self.shared.snapshot.read().active_call.is_none() {
            debug!("mute ignored, no active call");
            return self.snapshot();
        }
        let mut toggled = None;
        let snap = self.shared.mutate(|state| {
            if let Some(call) = state.active_call.as_mut() {
                call.muted = !call.muted;
                toggled = Some((call.id, call.muted));
            }
        });
        if let Some((call_id, muted)) = toggled {
            debug!(%call_id, muted, "mute toggled");
            if let Err(err) = self.transport.set_muted(call_id, muted).await {
                warn!(%call_id, error = %err, "transport mute failed");
            }
        }
        snap
    }

    /// Toggle the hold flag. Same no-op contract as [`mute_call`].
    ///
    /// [`mute_call`]: CallSessionManager::mute_call
    pub async fn hold_call(&self) -> Arc<SoftphoneSnapshot> {
        if self.shared.snapshot.read().active_call.is_none() {
            debug!("hold ignored, no active call");
            return self.snapshot();
        }
        let mut toggled = None;
        let snap = self.shared.mutate(|state| {
            if let Some(call) = state.active_call.as_mut() {
                call.on_hold = !call.on_hold;
                toggled = Some((call.id, call.on_hold));
            }
        });
        if let Some((call_id, on_hold)) = toggled {
            debug!(%call_id, on_hold, "hold toggled");
            if let Err(err) = self.transport.set_hold(call_id, on_hold).await {
                warn!(%call_id, error = %err, "transport hold failed");
            }
        }
        snap
    }

    /// Record whether the softphone is registered with the provider.
    pub fn set_online(&self, online: bool) -> Arc<SoftphoneSnapshot> {
        info!(online, "softphone registration state");
        self.shared.mutate(|state| {
            state.online = online;
        })
    }

    /// Track the lead the agent is currently working.
    pub fn set_current_lead(&self, lead: Option<Lead>) -> Arc<SoftphoneSnapshot> {
        self.shared.mutate(|state| {
            state.current_lead = lead;
        })
    }

    /// Feed a transport progress notification into the state machine.
    ///
    /// Events for calls that no longer occupy the line are silently
    /// discarded.
    pub fn on_transport_event(&self, event: TransportEvent) {
        match event {
            TransportEvent::Ringing { call_id } => self.shared.apply_ringing(call_id),
            TransportEvent::Answered { call_id } => self.shared.apply_answered(call_id),
            TransportEvent::RemoteHangup { call_id } => {
                if let Some(call) = self.shared.complete_active(Some(call_id), None, None) {
                    info!(%call_id, duration_ms = call.duration_ms, "remote hangup");
                } else {
                    debug!(%call_id, "stale remote hangup discarded");
                }
            }
            TransportEvent::Failed { call_id, reason } => {
                if self
                    .shared
                    .complete_active(Some(call_id), None, None)
                    .is_some()
                {
                    warn!(%call_id, %reason, "call failed in transport");
                } else {
                    debug!(%call_id, "stale failure discarded");
                }
            }
        }
    }

    /// Schedule the cancellable simulated ringing transition for `call_id`.
    fn schedule_ring(&self, call_id: CallId) {
        let Some(delay) = self.config.ring_delay else {
            return;
        };
        let shared = self.shared.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.apply_ringing(call_id);
        });
        let mut guard = self.shared.ring_task.lock();
        if let Some(previous) = guard.replace(RingTask { call_id, handle }) {
            previous.handle.abort();
        }
    }
}
