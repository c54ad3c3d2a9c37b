// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Outlay tests.
//!
//! Provides entity fixtures and a mock backend so integration tests
//! run fast, deterministic, and offline.
//!
//! # Components
//!
//! - [`fixtures`] - normalized entity builders with sensible defaults
//! - [`MockBackend`] - wiremock server with backend-shaped responses

pub mod backend;
pub mod fixtures;

pub use backend::MockBackend;
