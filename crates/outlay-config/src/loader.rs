// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./outlay.toml` > `~/.config/outlay/outlay.toml` > `/etc/outlay/outlay.toml`
//! with environment variable overrides via `OUTLAY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::OutlayConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/outlay/outlay.toml` (system-wide)
/// 3. `~/.config/outlay/outlay.toml` (user XDG config)
/// 4. `./outlay.toml` (local directory)
/// 5. `OUTLAY_*` environment variables
pub fn load_config() -> Result<OutlayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OutlayConfig::default()))
        .merge(Toml::file("/etc/outlay/outlay.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("outlay/outlay.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("outlay.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and for callers that supply the config inline.
pub fn load_config_from_str(toml_content: &str) -> Result<OutlayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OutlayConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<OutlayConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(OutlayConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `OUTLAY_API_BASE_URL` must
/// map to `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("OUTLAY_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: OUTLAY_SESSION_STORAGE_PATH -> "session_storage_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("session_", "session.", 1)
            .replacen("insights_", "insights.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
