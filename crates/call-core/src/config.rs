//! Call session manager configuration.

use std::time::Duration;

/// Configuration for a [`CallSessionManager`](crate::CallSessionManager)
#[derive(Debug, Clone)]
pub struct CallManagerConfig {
    /// Delay before the manager's own simulated ringing transition fires
    /// for a dialing call.
    ///
    /// `None` disables the simulation entirely, leaving call progress to
    /// the transport's [`TransportEvent`](crate::TransportEvent)s. The
    /// simulated transition is scheduled as a cancellable task, so ending
    /// or answering the call first always pre-empts it.
    pub ring_delay: Option<Duration>,
}

impl Default for CallManagerConfig {
    fn default() -> Self {
        Self {
            ring_delay: Some(Duration::from_millis(1000)),
        }
    }
}

impl CallManagerConfig {
    /// Use a specific simulated ring delay.
    pub fn with_ring_delay(mut self, delay: Duration) -> Self {
        self.ring_delay = Some(delay);
        self
    }

    /// Disable the simulated ringing transition; progress comes only from
    /// the transport.
    pub fn without_simulated_ringing(mut self) -> Self {
        self.ring_delay = None;
        self
    }
}
