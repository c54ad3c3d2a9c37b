// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the assembled application.
//!
//! Each test builds an isolated [`App`] against its own mock backend
//! and temp session file, then drives it the way an embedding UI
//! would: sign in, read collections, mutate, read derived views.

use chrono::NaiveDate;
use outlay::{App, OutlayConfig};
use outlay_core::types::ExpenseStatus;
use outlay_session::SessionState;
use outlay_test_utils::backend::{wire_category, wire_expense, wire_user};
use outlay_test_utils::{fixtures, MockBackend};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn config_for(backend: &MockBackend, dir: &tempfile::TempDir) -> OutlayConfig {
    let mut config = OutlayConfig::default();
    config.api.base_url = backend.uri();
    config.api.timeout_secs = 5;
    config.session.storage_path = dir
        .path()
        .join("session.json")
        .to_string_lossy()
        .into_owned();
    config
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ---- Sign-in produces a durable session ----

#[tokio::test]
async fn login_authenticates_and_persists_the_token() {
    let backend = MockBackend::start().await;
    // This deployment spells the token "accessToken" and sends no
    // refresh credential; sign-in must cope with both.
    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "tok123",
            "user": {
                "id": 1,
                "username": "alice",
                "email": "alice@example.com",
                "is_staff": true
            }
        })))
        .mount(backend.server())
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = App::new(config_for(&backend, &dir)).unwrap();

    let identity = app.login("alice@example.com", "secret").await.unwrap();

    assert_eq!(identity.id, 1);
    assert_eq!(app.session().state(), SessionState::Authenticated);
    let stored = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    assert!(
        stored.contains("tok123"),
        "durable session should hold the access token"
    );
}

// ---- The final payment moves the expense to PAID ----

#[tokio::test]
async fn recording_the_final_payment_settles_the_expense() {
    let backend = MockBackend::start().await;
    backend.accept_login("access-1", "refresh-1").await;

    let before = fixtures::ExpenseFixture::new(1).amounts(500.0, 400.0).build();
    let after = fixtures::ExpenseFixture::new(1)
        .amounts(500.0, 500.0)
        .with_payment(fixtures::payment(21, 1, 100.0, date(2026, 8, 10)))
        .build();

    // The first list read answers with the partially paid expense;
    // every read after the payment answers with the settled one.
    Mock::given(method("GET"))
        .and(path("/expenses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([wire_expense(&before)])))
        .up_to_n_times(1)
        .mount(backend.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/expenses/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([wire_expense(&after)])))
        .mount(backend.server())
        .await;
    backend
        .post_json(
            "/payments/",
            201,
            json!({
                "message": "Payment recorded successfully",
                "expense": wire_expense(&after),
            }),
        )
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = App::new(config_for(&backend, &dir)).unwrap();
    app.login("admin", "pw").await.unwrap();

    app.expenses.fetch_all().await.unwrap();
    let partial = app.expenses.snapshot().await;
    assert_eq!(partial.items[0].status, ExpenseStatus::Partial);
    assert_eq!(partial.items[0].remaining_amount, 100.0);

    let receipt = app.record_payment(1, 100.0).await.unwrap();
    assert_eq!(receipt.message, "Payment recorded successfully");

    let settled = app.expenses.snapshot().await;
    assert_eq!(settled.items[0].amount_paid, 500.0);
    assert_eq!(settled.items[0].remaining_amount, 0.0);
    assert_eq!(settled.items[0].status, ExpenseStatus::Paid);
    // The receipt's embedded payment landed in the payment cache too.
    assert_eq!(app.payments.snapshot().await.items[0].id, 21);
}

// ---- Logout clears the session file and the caches ----

#[tokio::test]
async fn logout_clears_the_durable_session_and_the_caches() {
    let backend = MockBackend::start().await;
    backend.accept_login("access-1", "refresh-1").await;
    backend.accept_logout().await;
    backend
        .get_ok(
            "/expenses/",
            json!([wire_expense(&fixtures::ExpenseFixture::new(4).build())]),
        )
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let app = App::new(config_for(&backend, &dir)).unwrap();

    app.login("admin", "pw").await.unwrap();
    app.expenses.fetch_all().await.unwrap();
    assert!(session_file.exists());
    assert_eq!(app.expenses.snapshot().await.items.len(), 1);

    app.logout().await.unwrap();

    assert_eq!(app.session().state(), SessionState::Anonymous);
    assert!(!session_file.exists(), "session file should be removed");
    assert!(
        app.expenses.snapshot().await.items.is_empty(),
        "caches purge on sign-out"
    );
}

// ---- An expired token refreshes transparently mid-read ----

#[tokio::test]
async fn store_reads_survive_an_expired_access_token() {
    let backend = MockBackend::start().await;
    backend.accept_login("stale-token", "refresh-1").await;

    Mock::given(method("GET"))
        .and(path("/categories/"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(backend.server())
        .await;
    Mock::given(method("POST"))
        .and(path("/accounts/refresh/"))
        .and(body_json(json!({"refresh": "refresh-1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "fresh-token"})),
        )
        .expect(1)
        .mount(backend.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([wire_category(&fixtures::category(1, "Travel"))])),
        )
        .mount(backend.server())
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = App::new(config_for(&backend, &dir)).unwrap();
    app.login("admin", "pw").await.unwrap();

    app.categories.fetch_all().await.unwrap();

    let snapshot = app.categories.snapshot().await;
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].name, "Travel");
    assert_eq!(app.session().state(), SessionState::Authenticated);
}

// ---- A second run restores the persisted session ----

#[tokio::test]
async fn a_restarted_app_reuses_the_stored_session() {
    let backend = MockBackend::start().await;
    backend.accept_login("access-1", "refresh-1").await;
    backend
        .get_ok("/users/", json!([wire_user(&fixtures::app_user(3, "lena"))]))
        .await;

    let dir = tempfile::tempdir().unwrap();
    {
        let first = App::new(config_for(&backend, &dir)).unwrap();
        first.login("admin", "pw").await.unwrap();
    }

    // No second login; the restored token authenticates the read.
    let second = App::new(config_for(&backend, &dir)).unwrap();
    assert_eq!(second.session().state(), SessionState::Authenticated);

    second.users.fetch_all().await.unwrap();
    assert_eq!(second.users.snapshot().await.items[0].username, "lena");
}

// ---- User toggles re-read the roster ----

#[tokio::test]
async fn toggling_a_user_refetches_the_roster() {
    let backend = MockBackend::start().await;
    backend.accept_login("access-1", "refresh-1").await;

    let active = fixtures::app_user(9, "lena");
    let mut disabled = fixtures::app_user(9, "lena");
    disabled.is_active = false;

    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([wire_user(&active)])))
        .up_to_n_times(1)
        .mount(backend.server())
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/9/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "User disabled successfully"
        })))
        .expect(1)
        .mount(backend.server())
        .await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([wire_user(&disabled)])))
        .mount(backend.server())
        .await;

    let dir = tempfile::tempdir().unwrap();
    let app = App::new(config_for(&backend, &dir)).unwrap();
    app.login("admin", "pw").await.unwrap();
    app.users.fetch_all().await.unwrap();

    let message = app.toggle_user(9).await.unwrap();

    assert_eq!(message, "User disabled successfully");
    let snapshot = app.users.snapshot().await;
    assert!(!snapshot.items[0].is_active, "re-read shows the disabled flag");
}

// ---- Derived views follow the fetched collections ----

#[tokio::test]
async fn monthly_breakdown_reflects_fetched_expenses() {
    let backend = MockBackend::start().await;
    backend.accept_login("access-1", "refresh-1").await;

    let july = fixtures::ExpenseFixture::new(1)
        .amounts(120.0, 0.0)
        .created_on(date(2026, 7, 3))
        .build();
    let august = fixtures::ExpenseFixture::new(2)
        .amounts(80.0, 30.0)
        .created_on(date(2026, 8, 14))
        .build();
    backend
        .get_ok(
            "/expenses/",
            json!([wire_expense(&july), wire_expense(&august)]),
        )
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&backend, &dir);
    config.insights.monthly_window = 3;
    let app = App::new(config).unwrap();
    app.login("admin", "pw").await.unwrap();
    app.expenses.fetch_all().await.unwrap();

    let buckets = app.monthly_breakdown(date(2026, 8, 31)).await;
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0].key(), "2026-06");
    assert_eq!(buckets[0].total, 0.0);
    assert_eq!(buckets[1].total, 120.0);
    assert_eq!(buckets[2].total, 80.0);

    let totals = app.totals().await;
    assert_eq!(totals.requested, 200.0);
    assert_eq!(totals.paid, 30.0);
    assert_eq!(totals.outstanding, 170.0);
}
