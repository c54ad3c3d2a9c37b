// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached category collection.

use std::sync::Arc;

use outlay_client::ApiClient;
use outlay_core::error::Result;
use outlay_core::types::Category;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::collection::{CollectionSnapshot, Tracked, display_error};

/// Category collection backed by `categories/`.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    client: ApiClient,
    state: Arc<Mutex<Tracked<Category>>>,
}

impl CategoryStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(Tracked::new())),
        }
    }

    /// Replaces the cached collection with the server's current list.
    pub async fn fetch_all(&self) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.fetch_categories().await {
            Ok(items) => {
                let count = items.len();
                if self.state.lock().await.fulfill_fetch(seq, items) {
                    debug!(count, "category collection refreshed");
                } else {
                    debug!("stale category list discarded");
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "category fetch failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Creates a category and appends the server's echo to the cache.
    pub async fn create(&self, name: &str) -> Result<Category> {
        let seq = self.state.lock().await.begin();
        match self.client.create_category(name).await {
            Ok(category) => {
                self.state
                    .lock()
                    .await
                    .fulfill_upsert(seq, category.clone());
                Ok(category)
            }
            Err(err) => {
                warn!(error = %err, "category create failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Cloned view of the cached collection.
    pub async fn snapshot(&self) -> CollectionSnapshot<Category> {
        self.state.lock().await.snapshot()
    }

    /// Drops every cached entity, for when the session ends.
    pub async fn purge(&self) {
        self.state.lock().await.purge();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use outlay_core::types::UserIdentity;
    use outlay_session::SessionHandle;
    use secrecy::SecretString;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn store_for(server: &MockServer) -> CategoryStore {
        let session = SessionHandle::ephemeral();
        session
            .login_succeeded(
                UserIdentity {
                    id: 1,
                    username: "admin".into(),
                    email: "admin@example.com".into(),
                    is_staff: true,
                },
                SecretString::from("access-1".to_string()),
                SecretString::from("refresh-1".to_string()),
            )
            .await
            .unwrap();
        let client = ApiClient::new(&server.uri(), Duration::from_secs(5), session).unwrap();
        CategoryStore::new(client)
    }

    #[tokio::test]
    async fn fetch_then_create_grows_the_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Meals", "is_active": true},
                {"id": 2, "name": "Travel", "is_active": true}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/categories/"))
            .and(body_json(serde_json::json!({"name": "Lodging"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!(
                {"id": 3, "name": "Lodging", "is_active": true}
            )))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        store.fetch_all().await.unwrap();
        let created = store.create("Lodging").await.unwrap();
        assert_eq!(created.id, 3);

        let snap = store.snapshot().await;
        assert_eq!(snap.items.len(), 3);
        assert_eq!(snap.items[2].name, "Lodging");
    }

    #[tokio::test]
    async fn duplicate_name_rejection_is_kept_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/categories/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Category with this name already exists"
            })))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        store.create("Meals").await.unwrap_err();

        let snap = store.snapshot().await;
        assert_eq!(
            snap.error.as_deref(),
            Some("Category with this name already exists")
        );
        assert!(!snap.loading);
    }
}
