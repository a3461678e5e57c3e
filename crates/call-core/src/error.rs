//! Error types for call session operations.

use thiserror::Error;

/// Result type for call session operations
pub type CallResult<T> = Result<T, CallError>;

/// Errors surfaced by the call session manager
///
/// All variants are local, recoverable conditions meant for a user-visible
/// message; none are fatal. Mute and hold on an absent call are deliberate
/// no-ops rather than errors, so UI controls stay safe to invoke
/// unconditionally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    /// A call is already occupying the line
    #[error("line busy: a call is already active")]
    LineBusy,

    /// The requested operation needs an active call and none exists
    #[error("no active call for {operation}")]
    NoActiveCall { operation: &'static str },

    /// The caller supplied unusable input
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The voice transport rejected or failed a command
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl CallError {
    /// Create a no-active-call error for the named operation
    pub fn no_active_call(operation: &'static str) -> Self {
        Self::NoActiveCall { operation }
    }

    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
