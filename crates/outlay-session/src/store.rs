// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable session persistence.
//!
//! Tokens survive process restarts in a single JSON file. Writes land in
//! a sibling temp file first and are renamed into place, so a crash never
//! leaves a half-written session behind. On Unix the file is owner-only.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use outlay_core::error::{OutlayError, Result};
use outlay_core::types::UserIdentity;
use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// On-disk shape of a persisted session.
///
/// Token fields are zeroized when this struct drops; take them with
/// `std::mem::take` rather than moving the struct apart.
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct StoredSession {
    #[zeroize(skip)]
    pub identity: UserIdentity,
    pub access_token: String,
    pub refresh_token: String,
}

/// File-backed store for the session, or an ephemeral one for tests.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Store backed by the given file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store that never touches disk. Restarting loses the session.
    pub fn ephemeral() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the persisted session, if any.
    ///
    /// A missing, unreadable, or corrupt file is treated as signed out
    /// rather than an error; corruption is logged and the file left for
    /// inspection until the next save overwrites it.
    pub fn load(&self) -> Option<StoredSession> {
        let path = self.path.as_deref()?;
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read session file, starting signed out");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(stored) => Some(stored),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "session file is corrupt, starting signed out");
                None
            }
        }
    }

    /// Persist the session atomically.
    pub fn save(&self, session: &StoredSession) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| storage_error("create session dir", e))?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| storage_error("encode session", e.into()))?;

        // Write the temp file with final permissions, then rename over the
        // real path so readers only ever see a complete file.
        let tmp = path.with_extension("json.tmp");
        let _ = fs::remove_file(&tmp);

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&tmp)
            .map_err(|e| storage_error("create session temp file", e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| storage_error("write session temp file", e))?;
        file.sync_all()
            .map_err(|e| storage_error("sync session temp file", e))?;
        drop(file);

        fs::rename(&tmp, path).map_err(|e| storage_error("install session file", e))
    }

    /// Remove the persisted session. Missing files are fine.
    pub fn clear(&self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove session file", e)),
        }
    }
}

fn storage_error(action: &str, e: std::io::Error) -> OutlayError {
    OutlayError::Storage {
        message: format!("failed to {action}"),
        source: Some(Box::new(e)),
    }
}
