// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached expense collection.

use std::sync::Arc;

use outlay_client::{ApiClient, ExpenseDraft};
use outlay_core::error::Result;
use outlay_core::types::Expense;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::collection::{CollectionSnapshot, Tracked, display_error};

/// Expense collection backed by `expenses/`.
///
/// Cheap to clone; clones share the cached state. The lock is held only
/// for synchronous bookkeeping, never across a server call.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    client: ApiClient,
    state: Arc<Mutex<Tracked<Expense>>>,
}

impl ExpenseStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(Tracked::new())),
        }
    }

    /// Replaces the cached collection with the server's current list.
    pub async fn fetch_all(&self) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.fetch_expenses().await {
            Ok(items) => {
                let count = items.len();
                if self.state.lock().await.fulfill_fetch(seq, items) {
                    debug!(count, "expense collection refreshed");
                } else {
                    debug!("stale expense list discarded");
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "expense fetch failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Creates an expense and appends the server's echo to the cache.
    pub async fn create(&self, draft: &ExpenseDraft) -> Result<Expense> {
        let seq = self.state.lock().await.begin();
        match self.client.create_expense(draft).await {
            Ok(expense) => {
                self.state.lock().await.fulfill_upsert(seq, expense.clone());
                Ok(expense)
            }
            Err(err) => {
                warn!(error = %err, "expense create failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Replaces an expense record. Fails for expenses already fully
    /// paid; the server's wording lands in the collection error slot.
    pub async fn update(&self, id: i64, draft: &ExpenseDraft) -> Result<Expense> {
        let seq = self.state.lock().await.begin();
        match self.client.update_expense(id, draft).await {
            Ok(expense) => {
                self.state.lock().await.fulfill_upsert(seq, expense.clone());
                Ok(expense)
            }
            Err(err) => {
                warn!(error = %err, expense = id, "expense update failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.delete_expense(id).await {
            Ok(()) => {
                self.state.lock().await.fulfill_remove(seq, id);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, expense = id, "expense delete failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Cloned view of the cached collection.
    pub async fn snapshot(&self) -> CollectionSnapshot<Expense> {
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
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn store_for(server: &MockServer) -> ExpenseStore {
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
        ExpenseStore::new(client)
    }

    fn expense_body(id: i64, requested: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "employee": 1,
            "category": 1,
            "amount_requested": requested,
            "amount_paid": "0.00",
            "remaining_amount": requested,
            "status": "UNPAID",
            "payments": [],
            "created_by": "admin",
            "updated_by": null,
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": "2026-01-10T09:00:00Z"
        })
    }

    #[tokio::test]
    async fn fetch_all_replaces_the_collection_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                expense_body(1, "100.00"),
                expense_body(2, "200.00"),
            ])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([expense_body(2, "200.00")])),
            )
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        store.fetch_all().await.unwrap();
        assert_eq!(store.snapshot().await.items.len(), 2);

        // The second list is shorter; a replace (not a merge) must shrink
        // the cache with it.
        store.fetch_all().await.unwrap();
        let snap = store.snapshot().await;
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].id, 2);
        assert!(!snap.loading);
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn slow_fetch_never_overwrites_a_newer_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([expense_body(1, "100.00")]))
                    .set_delay(Duration::from_millis(300)),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                expense_body(1, "100.00"),
                expense_body(2, "200.00"),
            ])))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        let slow = store.fetch_all();
        let fast = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            store.fetch_all().await
        };
        let (slow_result, fast_result) = tokio::join!(slow, fast);
        slow_result.unwrap();
        fast_result.unwrap();

        let snap = store.snapshot().await;
        assert_eq!(snap.items.len(), 2, "the late single-item list must be discarded");
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn create_appends_the_server_echo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([expense_body(1, "100.00")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(expense_body(7, "450.00")))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        store.fetch_all().await.unwrap();
        let created = store
            .create(&ExpenseDraft {
                employee_id: 1,
                category_id: 1,
                amount_requested: 450.0,
            })
            .await
            .unwrap();
        assert_eq!(created.id, 7);

        let snap = store.snapshot().await;
        assert_eq!(snap.items.len(), 2);
        assert_eq!(snap.items[1].id, 7, "new expenses go to the end");
    }

    #[tokio::test]
    async fn rejection_keeps_items_and_stores_the_server_wording() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([expense_body(1, "100.00")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/expenses/1/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Expense already paid"
            })))
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        store.fetch_all().await.unwrap();
        let err = store
            .update(
                1,
                &ExpenseDraft {
                    employee_id: 1,
                    category_id: 1,
                    amount_requested: 900.0,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));

        let snap = store.snapshot().await;
        assert_eq!(snap.items.len(), 1, "a failed update must not drop cached rows");
        assert_eq!(snap.error.as_deref(), Some("Expense already paid"));
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn delete_removes_the_row_locally() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/expenses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                expense_body(1, "100.00"),
                expense_body(2, "200.00"),
            ])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/expenses/1/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server).await;
        store.fetch_all().await.unwrap();
        store.delete(1).await.unwrap();

        let snap = store.snapshot().await;
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].id, 2);
    }
}
