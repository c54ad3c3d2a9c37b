// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session lifecycle for the Outlay client.
//!
//! This crate owns everything about "who is signed in":
//! - **FSM**: Anonymous -> Authenticating -> Authenticated transitions
//! - **Token custody**: access/refresh tokens held as secrets, exposed
//!   only at request-dispatch time
//! - **Durable storage**: an atomic, owner-only JSON file so sessions
//!   survive restarts
//! - **Broadcast**: a watch channel observers use to react to login,
//!   logout, and forced expiry

pub mod handle;
pub mod state;
pub mod store;

pub use handle::SessionHandle;
pub use state::{SessionSnapshot, SessionState};
pub use store::{SessionStore, StoredSession};
