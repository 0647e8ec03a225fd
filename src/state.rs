//! # Ready-state lifecycle for the adapter.
//!
//! [`ReadyState`] models the connection-like lifecycle of the channel and
//! [`ReadyStateMachine`] owns the current value and enforces the transition
//! rules.
//!
//! ## States
//! ```text
//!            ┌──────────────┐
//!            ▼              │
//!   CONNECTING ◄──────► OPEN
//!        │                │
//!        └────► CLOSED ◄──┘      (terminal: no transitions out)
//! ```
//!
//! ## Rules
//! - The machine starts in `CONNECTING` and is mutated only through
//!   [`ReadyStateMachine::transition`].
//! - Setting the current value again is a silent no-op (no notification).
//! - Once `CLOSED` is reached, every transition to a *different* state fails
//!   with [`StateError::Terminal`]; the state is never reset.
//!
//! The machine itself does not dispatch notifications; it reports the applied
//! state and the adapter core fires `"open"` / `"error"` accordingly.

use std::fmt;

use parking_lot::Mutex;

use crate::error::StateError;

/// Connection lifecycle value of the adapter.
///
/// Wire representation uses the codes `0` (`CONNECTING`), `1` (`OPEN`) and
/// `2` (`CLOSED`); see [`ReadyState::as_code`] and
/// [`ReadyState::try_from_code`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReadyState {
    /// The channel is being established. Initial state.
    #[default]
    Connecting,
    /// The channel is established and flowing.
    Open,
    /// The channel is closed. Terminal: no further transitions are permitted.
    Closed,
}

impl ReadyState {
    /// Returns the wire code for this state (`0`, `1` or `2`).
    #[inline]
    pub fn as_code(self) -> u8 {
        match self {
            ReadyState::Connecting => 0,
            ReadyState::Open => 1,
            ReadyState::Closed => 2,
        }
    }

    /// Parses a wire code into a state.
    ///
    /// # Example
    /// ```
    /// use patchbay::ReadyState;
    ///
    /// assert_eq!(ReadyState::try_from_code(1), Ok(ReadyState::Open));
    /// assert!(ReadyState::try_from_code(7).is_err());
    /// ```
    pub fn try_from_code(code: u8) -> Result<Self, StateError> {
        match code {
            0 => Ok(ReadyState::Connecting),
            1 => Ok(ReadyState::Open),
            2 => Ok(ReadyState::Closed),
            code => Err(StateError::Unrecognized { code }),
        }
    }

    /// Returns `true` for the terminal `CLOSED` state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ReadyState::Closed)
    }

    /// Returns `true` while the channel is established.
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, ReadyState::Open)
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadyState::Connecting => "CONNECTING",
            ReadyState::Open => "OPEN",
            ReadyState::Closed => "CLOSED",
        };
        f.write_str(name)
    }
}

/// Owns the current [`ReadyState`] and enforces the transition rules.
///
/// Transitions run synchronously to completion; the lock is never held across
/// user code.
pub(crate) struct ReadyStateMachine {
    current: Mutex<ReadyState>,
}

impl ReadyStateMachine {
    /// Creates a machine in the initial `CONNECTING` state.
    pub(crate) fn new() -> Self {
        Self {
            current: Mutex::new(ReadyState::Connecting),
        }
    }

    /// Returns the current state.
    pub(crate) fn current(&self) -> ReadyState {
        *self.current.lock()
    }

    /// Attempts to move the machine to `next`.
    ///
    /// - `Ok(None)` — `next` equals the current state; nothing changed and no
    ///   notification should fire. This holds even when the machine is
    ///   `CLOSED` (the equality check runs before the terminal check, as in
    ///   the original lifecycle contract).
    /// - `Ok(Some(next))` — the transition was applied; the caller dispatches
    ///   the matching lifecycle notification.
    /// - `Err(StateError::Terminal)` — the machine is `CLOSED` and `next`
    ///   differs.
    pub(crate) fn transition(&self, next: ReadyState) -> Result<Option<ReadyState>, StateError> {
        let mut current = self.current.lock();

        if next == *current {
            return Ok(None);
        }
        if current.is_terminal() {
            return Err(StateError::Terminal);
        }

        *current = next;
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_connecting() {
        let machine = ReadyStateMachine::new();
        assert_eq!(machine.current(), ReadyState::Connecting);
    }

    #[test]
    fn test_transition_applies_and_reports_new_state() {
        let machine = ReadyStateMachine::new();
        assert_eq!(
            machine.transition(ReadyState::Open),
            Ok(Some(ReadyState::Open))
        );
        assert_eq!(machine.current(), ReadyState::Open);
    }

    #[test]
    fn test_same_state_is_silent_noop() {
        let machine = ReadyStateMachine::new();
        assert_eq!(machine.transition(ReadyState::Connecting), Ok(None));
        assert_eq!(machine.current(), ReadyState::Connecting);
    }

    #[test]
    fn test_closed_is_terminal_for_any_other_target() {
        let machine = ReadyStateMachine::new();
        machine.transition(ReadyState::Closed).unwrap();

        assert_eq!(
            machine.transition(ReadyState::Open),
            Err(StateError::Terminal)
        );
        assert_eq!(
            machine.transition(ReadyState::Connecting),
            Err(StateError::Terminal)
        );
        assert_eq!(machine.current(), ReadyState::Closed);
    }

    #[test]
    fn test_closed_to_closed_stays_a_noop() {
        let machine = ReadyStateMachine::new();
        machine.transition(ReadyState::Closed).unwrap();
        assert_eq!(machine.transition(ReadyState::Closed), Ok(None));
        assert_eq!(machine.current(), ReadyState::Closed);
    }

    #[test]
    fn test_open_back_to_connecting_is_allowed() {
        let machine = ReadyStateMachine::new();
        machine.transition(ReadyState::Open).unwrap();
        assert_eq!(
            machine.transition(ReadyState::Connecting),
            Ok(Some(ReadyState::Connecting))
        );
    }

    #[test]
    fn test_wire_codes_round_trip() {
        for state in [ReadyState::Connecting, ReadyState::Open, ReadyState::Closed] {
            assert_eq!(ReadyState::try_from_code(state.as_code()), Ok(state));
        }
        assert_eq!(
            ReadyState::try_from_code(3),
            Err(StateError::Unrecognized { code: 3 })
        );
    }
}
