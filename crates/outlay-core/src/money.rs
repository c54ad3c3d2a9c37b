// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decimal-string amount handling.
//!
//! The backend serializes every monetary field as a decimal string
//! (`"1500.00"`). All parsing happens here so the rest of the workspace
//! only ever sees finite `f64` values.

use tracing::warn;

/// Parses a wire amount string into a finite `f64`.
///
/// Malformed or non-finite input is coerced to `0.0` with a warning so
/// downstream sums and classifications never observe `NaN`.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(raw, "malformed amount on the wire, coercing to zero");
            0.0
        }
    }
}

/// Formats an amount the way the backend expects it in request bodies.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
