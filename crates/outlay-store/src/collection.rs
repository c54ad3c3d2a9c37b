// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconciliation core shared by every resource store.
//!
//! A [`Tracked`] collection runs each async operation through three
//! mutually exclusive phases. `begin` hands out a monotonically
//! increasing sequence number; the sequence decides, when responses
//! resolve out of dispatch order, which of them still matter:
//!
//! - a full fetch replaces the collection only when its sequence is
//!   newer than the last reconciliation, so a slow early fetch can
//!   never overwrite a faster later one;
//! - confirmed mutations (upsert, prepend, remove) always apply, and
//!   advance the reconciliation watermark so that fetches dispatched
//!   before the mutation are recognized as stale;
//! - the loading flag and error slot are settled only by the most
//!   recently dispatched operation.

use outlay_core::error::OutlayError;
use outlay_core::types::{AppUser, Category, Employee, Expense, Payment};

/// Keyed by a stable numeric id, letting the reconciler replace
/// in place instead of pushing duplicates.
pub(crate) trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Expense {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Payment {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Employee {
    fn key(&self) -> i64 {
        self.employee_id
    }
}

impl Keyed for Category {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for AppUser {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Point-in-time view of a collection handed to callers. Mutating it
/// has no effect on the store.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for CollectionSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Tracked<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    /// Sequence of the most recently dispatched operation.
    last_started: u64,
    /// Sequence of the newest reconciliation applied to `items`.
    last_reconciled: u64,
}

impl<T: Keyed + Clone> Tracked<T> {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            last_started: 0,
            last_reconciled: 0,
        }
    }

    /// Enters the pending phase: marks the collection loading, clears
    /// any stale error, and hands out this operation's sequence.
    pub(crate) fn begin(&mut self) -> u64 {
        self.last_started += 1;
        self.loading = true;
        self.error = None;
        self.last_started
    }

    /// Applies a full fetch. Returns false when the response is stale
    /// and was discarded.
    pub(crate) fn fulfill_fetch(&mut self, seq: u64, items: Vec<T>) -> bool {
        let fresh = seq > self.last_reconciled;
        if fresh {
            self.items = items;
            self.last_reconciled = seq;
        }
        self.settle(seq);
        fresh
    }

    /// Applies a confirmed create or update: replaces the entity with
    /// the same key, appends otherwise.
    pub(crate) fn fulfill_upsert(&mut self, seq: u64, item: T) {
        if let Some(slot) = self.items.iter_mut().find(|i| i.key() == item.key()) {
            *slot = item;
        } else {
            self.items.push(item);
        }
        self.mark_reconciled(seq);
        self.settle(seq);
    }

    /// Like [`fulfill_upsert`](Self::fulfill_upsert), but new entities
    /// go to the front (newest-first collections).
    pub(crate) fn fulfill_prepend(&mut self, seq: u64, item: T) {
        self.items.retain(|i| i.key() != item.key());
        self.items.insert(0, item);
        self.mark_reconciled(seq);
        self.settle(seq);
    }

    /// Applies a confirmed removal.
    pub(crate) fn fulfill_remove(&mut self, seq: u64, key: i64) {
        self.items.retain(|i| i.key() != key);
        self.mark_reconciled(seq);
        self.settle(seq);
    }

    /// Mutates one entity in place when present.
    pub(crate) fn fulfill_patch(&mut self, seq: u64, key: i64, patch: impl FnOnce(&mut T)) {
        if let Some(item) = self.items.iter_mut().find(|i| i.key() == key) {
            patch(item);
        }
        self.mark_reconciled(seq);
        self.settle(seq);
    }

    /// Ends an operation that carries no collection change (message-only
    /// responses).
    pub(crate) fn fulfill_noop(&mut self, seq: u64) {
        self.settle(seq);
    }

    /// Ends a failed operation. The error is recorded only when no
    /// newer operation has been dispatched since.
    pub(crate) fn reject(&mut self, seq: u64, message: String) {
        if seq == self.last_started {
            self.loading = false;
            self.error = Some(message);
        }
    }

    pub(crate) fn snapshot(&self) -> CollectionSnapshot<T> {
        CollectionSnapshot {
            items: self.items.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    pub(crate) fn purge(&mut self) {
        self.items.clear();
        self.loading = false;
        self.error = None;
    }

    pub(crate) fn find(&self, key: i64) -> Option<T> {
        self.items.iter().find(|i| i.key() == key).cloned()
    }

    fn mark_reconciled(&mut self, seq: u64) {
        if seq > self.last_reconciled {
            self.last_reconciled = seq;
        }
    }

    fn settle(&mut self, seq: u64) {
        if seq == self.last_started {
            self.loading = false;
        }
    }
}

/// Text stored on a collection when an operation fails. Validation
/// messages pass through verbatim; server faults and transport problems
/// get a stable generic line.
pub(crate) fn display_error(error: &OutlayError) -> String {
    match error {
        OutlayError::Api { status, message } if *status >= 500 => {
            format!("server error ({status}), please try again")
        }
        OutlayError::Api { message, .. } => message.clone(),
        OutlayError::SessionExpired(reason) => reason.clone(),
        _ => "could not reach the server".to_owned(),
    }
}
