//! Error types used by the adapter factory and the adapter surface.
//!
//! This module defines three error enums, one per failing surface:
//!
//! - [`StateError`] — rejected `set_ready_state` calls (terminal state, bad code).
//! - [`EgressError`] — failed outbound sends, including the un-enhanced stub.
//! - [`SealError`] — a broken enhancer chain detected while sealing the adapter.
//!
//! All types provide `as_label` for short stable snake_case labels in
//! logs/metrics. None of these errors are retried internally and none are
//! swallowed: each surfaces synchronously at the offending call site.

use thiserror::Error;

/// # Errors produced by ready-state transitions.
///
/// `CLOSED` is terminal: once reached, every further transition attempt fails.
/// The unrecognized-code variant surfaces from
/// [`ReadyState::try_from_code`](crate::ReadyState::try_from_code), the
/// boundary where wire values meet the typed state enum.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The ready state already reached `CLOSED` and cannot change again.
    #[error("ready state cannot change after CLOSED")]
    Terminal,

    /// The value is not one of the recognized ready-state codes.
    #[error("ready state must be CONNECTING (0), OPEN (1) or CLOSED (2), got {code}")]
    Unrecognized {
        /// The rejected wire code.
        code: u8,
    },
}

impl StateError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use patchbay::StateError;
    ///
    /// assert_eq!(StateError::Terminal.as_label(), "state_terminal");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StateError::Terminal => "state_terminal",
            StateError::Unrecognized { .. } => "state_unrecognized",
        }
    }
}

/// # Errors produced by the outbound (`egress`) path.
///
/// The base adapter ships no egress behavior: absent an enhancer, every call
/// fails with [`EgressError::NotConfigured`]. Enhancer-supplied egress reports
/// its own failures through [`EgressError::Failed`].
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EgressError {
    /// No enhancer has registered egress handling.
    #[error("there are no enhancers registered for egress()")]
    NotConfigured,

    /// Enhancer-provided egress failed to send the activity.
    #[error("egress failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl EgressError {
    /// Convenience constructor for [`EgressError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        EgressError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use patchbay::EgressError;
    ///
    /// assert_eq!(EgressError::NotConfigured.as_label(), "egress_not_configured");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EgressError::NotConfigured => "egress_not_configured",
            EgressError::Failed { .. } => "egress_failed",
        }
    }
}

/// # Errors raised while sealing the enhanced adapter.
///
/// Raised by [`create_adapter`](crate::create_adapter) before any instance is
/// returned; there is no degraded mode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealError {
    /// The enhancer chain returned an adapter that was not built by this
    /// factory's own base builder (a detached capability object).
    #[error("enhancer returned an adapter that was not built by this factory")]
    ForeignAdapter,
}

impl SealError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SealError::ForeignAdapter => "seal_foreign_adapter",
        }
    }
}
