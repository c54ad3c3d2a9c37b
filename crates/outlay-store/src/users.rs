// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached dashboard-account collection.
//!
//! Unlike employees, disabled accounts stay in the server's list, so
//! enabling and disabling flip the cached flag in place instead of
//! dropping rows.

use std::sync::Arc;

use outlay_client::{ApiClient, UserUpdate};
use outlay_core::error::{OutlayError, Result};
use outlay_core::types::AppUser;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::collection::{CollectionSnapshot, Tracked, display_error};

/// Account collection backed by `users/`. Staff-only server-side.
#[derive(Debug, Clone)]
pub struct UserStore {
    client: ApiClient,
    state: Arc<Mutex<Tracked<AppUser>>>,
}

impl UserStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(Tracked::new())),
        }
    }

    /// Replaces the cached collection with the server's current list.
    pub async fn fetch_all(&self) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.fetch_users().await {
            Ok(items) => {
                let count = items.len();
                if self.state.lock().await.fulfill_fetch(seq, items) {
                    debug!(count, "user collection refreshed");
                } else {
                    debug!("stale user list discarded");
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "user fetch failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Creates an account and appends the server's echo to the cache.
    pub async fn create(&self, username: &str, email: &str, password: &str) -> Result<AppUser> {
        let seq = self.state.lock().await.begin();
        match self.client.create_user(username, email, password).await {
            Ok(user) => {
                self.state.lock().await.fulfill_upsert(seq, user.clone());
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "user create failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Applies a partial update. The server answers with a message
    /// only, so the cache is left as-is for the caller to refresh.
    pub async fn update(&self, id: i64, changes: &UserUpdate) -> Result<String> {
        let seq = self.state.lock().await.begin();
        match self.client.update_user(id, changes).await {
            Ok(message) => {
                self.state.lock().await.fulfill_noop(seq);
                Ok(message)
            }
            Err(err) => {
                warn!(error = %err, user = id, "user update failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Disables an active account or re-enables a disabled one, picking
    /// the endpoint from the cached flag and flipping it on success.
    pub async fn toggle_active(&self, id: i64) -> Result<String> {
        let (seq, was_active) = {
            let mut state = self.state.lock().await;
            let Some(user) = state.find(id) else {
                return Err(OutlayError::Internal(format!(
                    "user {id} is not in the cached collection"
                )));
            };
            (state.begin(), user.is_active)
        };
        let call = if was_active {
            self.client.disable_user(id).await
        } else {
            self.client.activate_user(id).await
        };
        match call {
            Ok(message) => {
                self.state
                    .lock()
                    .await
                    .fulfill_patch(seq, id, |u| u.is_active = !was_active);
                Ok(message)
            }
            Err(err) => {
                warn!(error = %err, user = id, "user toggle failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Cloned view of the cached collection.
    pub async fn snapshot(&self) -> CollectionSnapshot<AppUser> {
        self.state.lock().await.snapshot()
    }

    /// Drops every cached entity, for when the session ends.
    pub async fn purge(&self) {
        self.state.lock().await.purge();
    }
}
