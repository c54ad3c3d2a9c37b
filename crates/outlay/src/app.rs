// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application assembly.
//!
//! [`App`] wires one session, one HTTP client, and the five resource
//! stores together from a validated config. There is no global state;
//! everything reaches its collaborators through the handles injected
//! here. The multi-step protocols that span stores (pay then re-read,
//! update a user then re-read) also live here, so each store stays a
//! single-resource concern.

use std::time::Duration;

use chrono::NaiveDate;
use outlay_client::{ApiClient, PaymentReceipt, UserUpdate};
use outlay_config::OutlayConfig;
use outlay_core::error::Result;
use outlay_core::types::UserIdentity;
use outlay_insights::{AmountField, CollectionTotals, EntityShare, MonthBucket};
use outlay_session::{SessionHandle, SessionStore};
use outlay_store::{CategoryStore, EmployeeStore, ExpenseStore, PaymentStore, UserStore};
use tracing::{debug, info};

/// The assembled client application.
///
/// Cheap to clone; clones share the session, the connection pool, and
/// the cached collections. A session persisted by a previous run is
/// restored during construction.
#[derive(Debug, Clone)]
pub struct App {
    config: OutlayConfig,
    client: ApiClient,
    pub expenses: ExpenseStore,
    pub payments: PaymentStore,
    pub employees: EmployeeStore,
    pub categories: CategoryStore,
    pub users: UserStore,
}

impl App {
    /// Builds the full stack from a loaded config: durable session
    /// store, session handle, HTTP client, and one store per resource.
    pub fn new(config: OutlayConfig) -> Result<Self> {
        let session = SessionHandle::new(SessionStore::at(config.session.storage_path.as_str()));
        let client = ApiClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
            session,
        )?;

        info!(base_url = %config.api.base_url, "outlay app assembled");

        Ok(Self {
            expenses: ExpenseStore::new(client.clone()),
            payments: PaymentStore::new(client.clone()),
            employees: EmployeeStore::new(client.clone()),
            categories: CategoryStore::new(client.clone()),
            users: UserStore::new(client.clone()),
            client,
            config,
        })
    }

    pub fn config(&self) -> &OutlayConfig {
        &self.config
    }

    /// The client the stores call through. Exposed for operations with
    /// no cached collection, such as report downloads and the password
    /// recovery flow.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionHandle {
        self.client.session()
    }

    /// Signs in with a username or email and persists the session for
    /// the next run.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<UserIdentity> {
        self.client.login(identifier, password).await
    }

    /// Signs out and empties every cached collection, so nothing from
    /// this account is left behind for the next sign-in on a shared
    /// machine.
    pub async fn logout(&self) -> Result<()> {
        let signed_out = self.client.logout().await;
        self.purge_collections().await;
        signed_out
    }

    /// Records a payment, then re-reads the expense collection. The
    /// backend moves amounts and status on the parent expense, and the
    /// fresh list is the read that reflects that everywhere at once.
    pub async fn record_payment(&self, expense_id: i64, amount: f64) -> Result<PaymentReceipt> {
        let receipt = self.payments.record(expense_id, amount).await?;
        self.expenses.fetch_all().await?;
        Ok(receipt)
    }

    /// Updates an account, then re-reads the roster; the update
    /// endpoint answers with a message only.
    pub async fn update_user(&self, id: i64, changes: &UserUpdate) -> Result<String> {
        let message = self.users.update(id, changes).await?;
        self.users.fetch_all().await?;
        Ok(message)
    }

    /// Disables an active account or re-enables a disabled one, then
    /// re-reads the roster.
    pub async fn toggle_user(&self, id: i64) -> Result<String> {
        let message = self.users.toggle_active(id).await?;
        self.users.fetch_all().await?;
        Ok(message)
    }

    /// Monthly requested-amount buckets over the cached expenses,
    /// covering the configured trailing window up to `reference`.
    pub async fn monthly_breakdown(&self, reference: NaiveDate) -> Vec<MonthBucket> {
        let snapshot = self.expenses.snapshot().await;
        outlay_insights::monthly_requested(
            &snapshot.items,
            reference,
            self.config.insights.monthly_window,
        )
    }

    /// Requested, paid, and outstanding totals over the cached
    /// expenses.
    pub async fn totals(&self) -> CollectionTotals {
        let snapshot = self.expenses.snapshot().await;
        outlay_insights::collection_totals(&snapshot.items)
    }

    /// Per-employee share of the cached expenses. Zero rows are kept;
    /// presenters drop them when unwanted.
    pub async fn employee_distribution(&self, field: AmountField) -> Vec<EntityShare> {
        let employees = self.employees.snapshot().await;
        let expenses = self.expenses.snapshot().await;
        outlay_insights::employee_distribution(&employees.items, &expenses.items, field)
    }

    async fn purge_collections(&self) {
        self.expenses.purge().await;
        self.payments.purge().await;
        self.employees.purge().await;
        self.categories.purge().await;
        self.users.purge().await;
        debug!("cached collections purged");
    }
}
