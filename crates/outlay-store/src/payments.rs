// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached payment collection, newest first.
//!
//! Recording a payment moves money on the parent expense server-side,
//! but this store touches only its own collection. The caller decides
//! when to refresh the expense cache; the returned receipt carries the
//! updated parent for callers who want it immediately.

use std::sync::Arc;

use outlay_client::{ApiClient, PaymentReceipt};
use outlay_core::error::Result;
use outlay_core::types::Payment;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::collection::{CollectionSnapshot, Tracked, display_error};

/// Payment collection backed by `payments/`.
#[derive(Debug, Clone)]
pub struct PaymentStore {
    client: ApiClient,
    state: Arc<Mutex<Tracked<Payment>>>,
}

impl PaymentStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(Tracked::new())),
        }
    }

    /// Replaces the cached collection with the server's list, which
    /// arrives newest first.
    pub async fn fetch_all(&self) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.fetch_payments().await {
            Ok(items) => {
                let count = items.len();
                if self.state.lock().await.fulfill_fetch(seq, items) {
                    debug!(count, "payment collection refreshed");
                } else {
                    debug!("stale payment list discarded");
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "payment fetch failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Records a payment against an expense and prepends it to the
    /// cache, keeping the newest-first order.
    pub async fn record(&self, expense_id: i64, amount: f64) -> Result<PaymentReceipt> {
        let seq = self.state.lock().await.begin();
        match self.client.record_payment(expense_id, amount).await {
            Ok(receipt) => {
                // The receipt echoes the full parent; its highest-id
                // embedded payment is the one this call created.
                let created = receipt
                    .expense
                    .payments
                    .iter()
                    .max_by_key(|p| p.id)
                    .cloned();
                let mut state = self.state.lock().await;
                match created {
                    Some(payment) => state.fulfill_prepend(seq, payment),
                    None => state.fulfill_noop(seq),
                }
                drop(state);
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, expense = expense_id, "payment record failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Deletes a payment. Rejected server-side once the parent expense
    /// is fully paid.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let seq = self.state.lock().await.begin();
        match self.client.delete_payment(id).await {
            Ok(()) => {
                self.state.lock().await.fulfill_remove(seq, id);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, payment = id, "payment delete failed");
                self.state.lock().await.reject(seq, display_error(&err));
                Err(err)
            }
        }
    }

    /// Cloned view of the cached collection.
    pub async fn snapshot(&self) -> CollectionSnapshot<Payment> {
        self.state.lock().await.snapshot()
    }

    /// Drops every cached entity, for when the session ends.
    pub async fn purge(&self) {
        self.state.lock().await.purge();
    }
}
