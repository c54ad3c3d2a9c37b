// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session FSM states and the observable snapshot type.

use outlay_core::types::UserIdentity;

/// States in the session FSM.
///
/// Sessions move Anonymous -> Authenticating -> Authenticated. A failed
/// login or an expired session drops back to Anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credentials held. Protected calls fail locally.
    Anonymous,
    /// Login request in flight.
    Authenticating,
    /// Tokens held. Requests carry the bearer header.
    Authenticated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticating => write!(f, "authenticating"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Point-in-time view of the session, broadcast to observers.
///
/// Deliberately excludes token material; only the handle itself can
/// produce a bearer header.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// Identity of the signed-in account, present only when authenticated
    /// (or tentatively restored from disk).
    pub identity: Option<UserIdentity>,
    /// Most recent login or expiry failure, cleared on the next attempt.
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }
}
