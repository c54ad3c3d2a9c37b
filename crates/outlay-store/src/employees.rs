// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached employee collection.
//!
//! The server lists only active employees, so a confirmed deactivation
//! drops the row from the cache just as the next fetch would.

use std::sync::Arc;

use outlay_client::{ApiClient, EmployeeDraft};
use outlay_core::error::Result;
use outlay_core::types::Employee;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::collection::{CollectionSnapshot, Tracked, display_error};

/// Employee collection backed by `employees/`.
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    client: ApiClient,
    state: Arc<Mutex<Tracked<Employee>>>,
}

impl EmployeeStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(Tracked::new())),
        }
    }

    /// Replaces the cached collection with the server's current list.
    pub async fn fetch_all(&self) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.fetch_employees().await {
            Ok(items) => {
                let count = items.len();
                if self.state.lock().await.fulfill_fetch(seq, items) {
                    debug!(count, "employee collection refreshed");
                } else {
                    debug!("stale employee list discarded");
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "employee fetch failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Registers an employee and appends the server's echo to the cache.
    pub async fn create(&self, draft: &EmployeeDraft) -> Result<Employee> {
        let seq = self.state.lock().await.begin();
        match self.client.create_employee(draft).await {
            Ok(employee) => {
                self.state
                    .lock()
                    .await
                    .fulfill_upsert(seq, employee.clone());
                Ok(employee)
            }
            Err(err) => {
                warn!(error = %err, "employee create failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    pub async fn update(&self, id: i64, draft: &EmployeeDraft) -> Result<Employee> {
        let seq = self.state.lock().await.begin();
        match self.client.update_employee(id, draft).await {
            Ok(employee) => {
                self.state
                    .lock()
                    .await
                    .fulfill_upsert(seq, employee.clone());
                Ok(employee)
            }
            Err(err) => {
                warn!(error = %err, employee = id, "employee update failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Deactivates an employee and drops the row locally.
    pub async fn deactivate(&self, id: i64) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.deactivate_employee(id).await {
            Ok(()) => {
                self.state.lock().await.fulfill_remove(seq, id);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, employee = id, "employee deactivate failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Cloned view of the cached collection.
    pub async fn snapshot(&self) -> CollectionSnapshot<Employee> {
        self.state.lock().await.snapshot()
    }

    /// Drops every cached entity, for when the session ends.
    pub async fn purge(&self) {
        self.state.lock().await.purge();
    }
}
