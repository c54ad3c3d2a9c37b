// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared session container driving the auth lifecycle FSM.
//!
//! One `SessionHandle` is shared by the HTTP client, the stores, and any
//! UI observers. State changes broadcast a [`SessionSnapshot`] over a
//! watch channel; observers react to teardown instead of polling.
//!
//! Token material lives only inside the handle as [`SecretString`] and
//! leaves it exclusively through the bearer/refresh accessors at
//! request-dispatch time.

use std::sync::Arc;

use outlay_core::error::{OutlayError, Result};
use outlay_core::types::UserIdentity;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{watch, Mutex};
use tracing::{info, warn};

use crate::state::{SessionSnapshot, SessionState};
use crate::store::{SessionStore, StoredSession};

struct SessionData {
    state: SessionState,
    identity: Option<UserIdentity>,
    access_token: Option<SecretString>,
    refresh_token: Option<SecretString>,
    error: Option<String>,
    /// Bumped every time the access token changes. The HTTP client uses
    /// this to tell "my token was already replaced" from "I must refresh".
    token_generation: u64,
}

struct Inner {
    data: Mutex<SessionData>,
    watch_tx: watch::Sender<SessionSnapshot>,
    store: SessionStore,
}

/// Cloneable handle to the one session shared across the app.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Inner>,
}

impl SessionHandle {
    /// Create a handle backed by the given store, restoring any session
    /// persisted by a previous run.
    ///
    /// A restored session is tentatively `Authenticated`; if its tokens
    /// have expired server-side, the first request discovers that and the
    /// normal refresh (or teardown) path runs.
    pub fn new(store: SessionStore) -> Self {
        let mut data = SessionData {
            state: SessionState::Anonymous,
            identity: None,
            access_token: None,
            refresh_token: None,
            error: None,
            token_generation: 0,
        };

        if let Some(mut stored) = store.load() {
            info!(username = %stored.identity.username, "restored session from disk");
            data.state = SessionState::Authenticated;
            data.identity = Some(stored.identity.clone());
            data.access_token = Some(SecretString::from(std::mem::take(
                &mut stored.access_token,
            )));
            data.refresh_token = Some(SecretString::from(std::mem::take(
                &mut stored.refresh_token,
            )));
            data.token_generation = 1;
        }

        let (watch_tx, _) = watch::channel(snapshot_of(&data));
        Self {
            inner: Arc::new(Inner {
                data: Mutex::new(data),
                watch_tx,
                store,
            }),
        }
    }

    /// Handle with no durable storage. Used by tests and one-shot tools.
    pub fn ephemeral() -> Self {
        Self::new(SessionStore::ephemeral())
    }

    /// Current snapshot without locking.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.watch_tx.borrow().clone()
    }

    /// Subscribe to session changes. The receiver sees every transition,
    /// including the forced teardown after a failed token refresh.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.watch_tx.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.snapshot().state
    }

    /// Access token for the Authorization header, present only while
    /// authenticated. Copied out at call time; never cached by callers.
    pub async fn bearer_token(&self) -> Option<String> {
        let data = self.inner.data.lock().await;
        if data.state != SessionState::Authenticated {
            return None;
        }
        data.access_token
            .as_ref()
            .map(|t| t.expose_secret().to_owned())
    }

    /// Access token paired with the generation counter that minted it,
    /// read under one lock acquisition. A caller holding the pair can
    /// later tell whether a 401 came from a token that was already
    /// replaced behind its back.
    pub async fn bearer_token_with_generation(&self) -> Option<(String, u64)> {
        let data = self.inner.data.lock().await;
        if data.state != SessionState::Authenticated {
            return None;
        }
        data.access_token
            .as_ref()
            .map(|t| (t.expose_secret().to_owned(), data.token_generation))
    }

    /// Refresh token for the token-refresh call.
    pub async fn refresh_token(&self) -> Option<String> {
        let data = self.inner.data.lock().await;
        if data.state != SessionState::Authenticated {
            return None;
        }
        data.refresh_token
            .as_ref()
            .map(|t| t.expose_secret().to_owned())
    }

    pub async fn token_generation(&self) -> u64 {
        self.inner.data.lock().await.token_generation
    }

    pub fn identity(&self) -> Option<UserIdentity> {
        self.snapshot().identity
    }

    /// Marks a login attempt as started and clears any previous error.
    pub async fn login_started(&self) {
        let mut data = self.inner.data.lock().await;
        // Transition: Anonymous -> Authenticating
        data.state = SessionState::Authenticating;
        data.error = None;
        self.notify(&data);
    }

    /// Installs credentials after a successful login and persists them.
    ///
    /// The in-memory session is authenticated even when the durable write
    /// fails; the returned error only means the session will not survive
    /// a restart.
    pub async fn login_succeeded(
        &self,
        identity: UserIdentity,
        access_token: SecretString,
        refresh_token: SecretString,
    ) -> Result<()> {
        let mut data = self.inner.data.lock().await;
        // Transition: Authenticating -> Authenticated
        data.state = SessionState::Authenticated;
        data.identity = Some(identity);
        data.access_token = Some(access_token);
        data.refresh_token = Some(refresh_token);
        data.error = None;
        data.token_generation += 1;
        self.notify(&data);

        info!(
            username = data.identity.as_ref().map(|i| i.username.as_str()).unwrap_or(""),
            "session authenticated"
        );
        self.persist(&data)
    }

    /// Records a failed login attempt.
    pub async fn login_failed(&self, message: impl Into<String>) {
        let mut data = self.inner.data.lock().await;
        // Transition: Authenticating -> Anonymous
        data.state = SessionState::Anonymous;
        data.identity = None;
        data.access_token = None;
        data.refresh_token = None;
        data.error = Some(message.into());
        self.notify(&data);

        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "could not clear session file after failed login");
        }
    }

    /// Signs out. Idempotent; clears memory and durable state together.
    pub async fn logout(&self) -> Result<()> {
        let mut data = self.inner.data.lock().await;
        // Transition: * -> Anonymous
        data.state = SessionState::Anonymous;
        data.identity = None;
        data.access_token = None;
        data.refresh_token = None;
        data.error = None;
        self.notify(&data);

        self.inner.store.clear()
    }

    /// Forced teardown after the backend rejected a token refresh.
    ///
    /// Same effect as [`logout`](Self::logout) except the reason is kept
    /// in the snapshot so observers can tell the user why they were
    /// signed out.
    pub async fn expire(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let mut data = self.inner.data.lock().await;
        // Transition: Authenticated -> Anonymous
        data.state = SessionState::Anonymous;
        data.identity = None;
        data.access_token = None;
        data.refresh_token = None;
        data.error = Some(reason.clone());
        self.notify(&data);

        warn!(reason = %reason, "session expired");
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "could not clear session file after expiry");
        }
    }

    /// Replaces the access token after a successful refresh.
    ///
    /// Fails with `SessionExpired` when the session ended between the
    /// refresh call and this rotation (for example a concurrent logout).
    /// Returns the new token generation.
    pub async fn rotate_access_token(&self, access_token: SecretString) -> Result<u64> {
        let mut data = self.inner.data.lock().await;
        if data.state != SessionState::Authenticated {
            return Err(OutlayError::SessionExpired(
                "session ended while refreshing credentials".into(),
            ));
        }
        data.access_token = Some(access_token);
        data.token_generation += 1;

        // Keep the durable copy current, but a failed disk write must not
        // fail the request that triggered the refresh.
        if let Err(e) = self.persist(&data) {
            warn!(error = %e, "could not persist rotated access token");
        }
        Ok(data.token_generation)
    }

    fn notify(&self, data: &SessionData) {
        self.inner.watch_tx.send_replace(snapshot_of(data));
    }

    fn persist(&self, data: &SessionData) -> Result<()> {
        let (Some(identity), Some(access), Some(refresh)) =
            (&data.identity, &data.access_token, &data.refresh_token)
        else {
            return Ok(());
        };
        self.inner.store.save(&StoredSession {
            identity: identity.clone(),
            access_token: access.expose_secret().to_owned(),
            refresh_token: refresh.expose_secret().to_owned(),
        })
    }
}

fn snapshot_of(data: &SessionData) -> SessionSnapshot {
    SessionSnapshot {
        state: data.state,
        identity: data.identity.clone(),
        error: data.error.clone(),
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snap = self.snapshot();
        f.debug_struct("SessionHandle")
            .field("state", &snap.state)
            .field(
                "identity",
                &snap.identity.as_ref().map(|i| i.username.as_str()),
            )
            .field(
                "tokens",
                &if snap.is_authenticated() { "[redacted]" } else { "none" },
            )
            .finish()
    }
}
