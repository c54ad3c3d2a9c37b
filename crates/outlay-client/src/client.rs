// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated HTTP client for the expense backend.
//!
//! Provides [`ApiClient`] which owns the connection pool and the
//! token-refresh gate. Every endpoint call funnels through
//! [`ApiClient::execute`], which attaches the bearer token at dispatch
//! time, refreshes it once on a 401, and retries idempotent requests
//! once on transient backend failures.

use std::sync::Arc;
use std::time::Duration;

use outlay_core::error::{OutlayError, Result};
use outlay_session::SessionHandle;
use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::wire;

/// Path of the token-refresh endpoint, relative to the API root.
const REFRESH_PATH: &str = "accounts/refresh/";

/// Delay before the single transient-failure retry.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Error text installed on the session when a refresh fails.
const SESSION_EXPIRED: &str = "your session has expired, please sign in again";

/// HTTP client for backend communication.
///
/// Cheap to clone; all clones share one connection pool, one session
/// handle, and one refresh gate.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionHandle,
    /// Serializes token refreshes so N concurrent 401s produce one
    /// refresh call.
    refresh_gate: Arc<Mutex<()>>,
}

/// How a request authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// Attach the session's access token; a 401 triggers the refresh
    /// path.
    Bearer,
    /// Send bare. Used by login and the password-recovery flow, which
    /// must never recurse into refresh handling.
    None,
}

/// One backend call, described declaratively so the dispatch loop can
/// re-issue it after a token refresh or a transient failure.
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    method: Method,
    path: String,
    body: Option<Value>,
    auth: Auth,
}

impl RequestSpec {
    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            auth: Auth::Bearer,
        }
    }

    pub(crate) fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
            auth: Auth::Bearer,
        }
    }

    pub(crate) fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
            auth: Auth::Bearer,
        }
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
            auth: Auth::Bearer,
        }
    }

    /// Drops the bearer requirement (login, password recovery).
    pub(crate) fn unauthenticated(mut self) -> Self {
        self.auth = Auth::None;
        self
    }
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (the `.../api` prefix),
    /// sharing the given session for token custody.
    pub fn new(base_url: &str, timeout: Duration, session: SessionHandle) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OutlayError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            session,
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    /// The session this client authenticates against.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Dispatches a request and returns the response once its status is
    /// a success. A 401 on a bearer request triggers one coalesced token
    /// refresh followed by one retry; transient backend failures (429,
    /// 502, 503, 504) are retried once for idempotent methods. No
    /// request is ever retried more than once.
    pub(crate) async fn execute(&self, spec: &RequestSpec) -> Result<reqwest::Response> {
        let mut retried = false;

        loop {
            let (generation, response) = self.dispatch(spec).await?;
            let status = response.status();
            debug!(method = %spec.method, path = %spec.path, status = %status, "response received");

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && spec.auth == Auth::Bearer && !retried {
                retried = true;
                self.refresh_access_token(generation).await?;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            let error = wire::api_error(status, &body);
            if error.is_transient() && spec.method.is_idempotent() && !retried {
                retried = true;
                warn!(status = %status, path = %spec.path, "transient backend failure, retrying once");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
            return Err(error);
        }
    }

    /// Executes a request and decodes its JSON body.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<T> {
        let response = self.execute(spec).await?;
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("could not read response body", e))?;
        serde_json::from_str(&body).map_err(|e| OutlayError::Transport {
            message: format!("could not decode response from {}: {e}", spec.path),
            source: Some(Box::new(e)),
        })
    }

    /// Executes a request whose response body carries nothing of
    /// interest (deletes return 204).
    pub(crate) async fn fetch_empty(&self, spec: &RequestSpec) -> Result<()> {
        self.execute(spec).await.map(|_| ())
    }

    /// Sends one attempt, returning the token generation it dispatched
    /// with so a 401 can be attributed to the right token.
    async fn dispatch(&self, spec: &RequestSpec) -> Result<(u64, reqwest::Response)> {
        let mut request = self.http.request(spec.method.clone(), self.url(&spec.path));
        let mut generation = 0;

        if spec.auth == Auth::Bearer {
            let (token, observed) = self
                .session
                .bearer_token_with_generation()
                .await
                .ok_or_else(|| OutlayError::SessionExpired("not signed in".into()))?;
            generation = observed;
            request = request.bearer_auth(token);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error("request failed", e))?;
        Ok((generation, response))
    }

    /// Refreshes the access token, coalescing concurrent attempts.
    ///
    /// `observed` is the generation the failing request dispatched with.
    /// If the session moved past it while this caller waited on the
    /// gate, another request already refreshed and there is nothing to
    /// do. Any refresh failure tears the session down; the caller's
    /// request fails with `SessionExpired` instead of being retried.
    async fn refresh_access_token(&self, observed: u64) -> Result<()> {
        let _gate = self.refresh_gate.lock().await;

        if self.session.token_generation().await > observed {
            debug!("access token already refreshed by a concurrent request");
            return Ok(());
        }

        let Some(refresh) = self.session.refresh_token().await else {
            return Err(OutlayError::SessionExpired(
                "signed out while a request was in flight".into(),
            ));
        };

        debug!("access token rejected, refreshing");
        match self.request_fresh_token(&refresh).await {
            Ok(token) => {
                self.session.rotate_access_token(token).await?;
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "token refresh failed, tearing down session");
                self.session.expire(SESSION_EXPIRED).await;
                Err(OutlayError::SessionExpired(SESSION_EXPIRED.into()))
            }
        }
    }

    /// Posted directly rather than through [`execute`](Self::execute):
    /// the refresh call must never carry a bearer token or recurse into
    /// its own 401 handling.
    async fn request_fresh_token(&self, refresh: &str) -> Result<SecretString> {
        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
            .map_err(|e| transport_error("token refresh request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(wire::api_error(status, &body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| transport_error("could not read refresh response", e))?;
        wire::extract_access_token(&body)
            .map(SecretString::from)
            .ok_or_else(|| OutlayError::Api {
                status: status.as_u16(),
                message: "refresh response carried no access token".into(),
            })
    }
}

pub(crate) fn transport_error(context: &str, e: reqwest::Error) -> OutlayError {
    OutlayError::Transport {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}
