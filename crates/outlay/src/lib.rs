// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless client for the Outlay expense dashboard backend.
//!
//! One [`App`] value holds the whole stack: a durable session, the
//! authenticated HTTP client with transparent token refresh, and a
//! cached store per backend resource. Summary views (status bands,
//! monthly buckets, per-employee distribution) are derived on demand
//! from the cached collections.
//!
//! ```no_run
//! use outlay::App;
//!
//! # async fn run() -> outlay_core::error::Result<()> {
//! let config = outlay_config::OutlayConfig::default();
//! let app = App::new(config)?;
//!
//! let identity = app.login("admin", "hunter2").await?;
//! println!("signed in as {}", identity.username);
//!
//! app.expenses.fetch_all().await?;
//! let totals = app.totals().await;
//! println!("outstanding: {:.2}", totals.outstanding);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod telemetry;

pub use app::App;
pub use outlay_config::OutlayConfig;
