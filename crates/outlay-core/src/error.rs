// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unified error type for all Outlay crates.

use thiserror::Error;

/// Top-level error enum covering every failure mode in the workspace.
#[derive(Debug, Error)]
pub enum OutlayError {
    /// Configuration loading or validation failed.
    #[error("config error: {0}")]
    Config(String),

    /// The request never produced an HTTP response (DNS, connect,
    /// timeout, TLS). Retrying later may succeed.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status. `message` is the
    /// server's own wording where one could be extracted.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The session could not be kept alive. The caller must treat the
    /// user as signed out.
    #[error("session expired: {0}")]
    SessionExpired(String),

    /// Reading or writing the durable session file failed.
    #[error("session storage error: {message}")]
    Storage {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invariant violation inside Outlay itself.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OutlayError {
    /// True for failures worth surfacing as a retry hint rather than a
    /// hard error: the backend was never reached, or it was overloaded.
    pub fn is_transient(&self) -> bool {
        match self {
            OutlayError::Transport { .. } => true,
            OutlayError::Api { status, .. } => {
                *status == 429 || *status == 502 || *status == 503 || *status == 504
            }
            _ => false,
        }
    }

    /// Status code when the error came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            OutlayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, OutlayError>;
