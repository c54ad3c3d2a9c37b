// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup for applications embedding [`App`].
//!
//! The library crates only emit events; installing a subscriber is the
//! embedder's call, made once at startup with the configured level.
//!
//! [`App`]: crate::App

use tracing_subscriber::EnvFilter;

/// Workspace crates covered by the configured level. Everything else
/// stays at warn unless `RUST_LOG` says otherwise.
const CRATES: [&str; 6] = [
    "outlay",
    "outlay_core",
    "outlay_session",
    "outlay_client",
    "outlay_store",
    "outlay_insights",
];

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Safe to call more than once; later calls
/// leave the first subscriber in place, which keeps tests that share a
/// process from panicking.
pub fn init(level: &str) {
    let directives = CRATES
        .map(|krate| format!("{krate}={level}"))
        .join(",");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{directives}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn repeated_init_does_not_panic() {
        init("debug");
        init("info");
    }
}
