// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sign-in, sign-out, and the email-OTP password recovery flow.
//!
//! These calls drive the session lifecycle as a side effect: `login`
//! walks it through Authenticating into Authenticated (or back to
//! Anonymous with the server's message), `logout` always tears local
//! state down even when the server cannot be reached.

use outlay_core::error::{OutlayError, Result};
use outlay_core::types::UserIdentity;
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::client::{ApiClient, RequestSpec};
use crate::wire;

/// Successful OTP verification: a display message plus the short-lived
/// token that authorizes the final password reset.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerification {
    pub message: String,
    pub reset_token: String,
}

impl ApiClient {
    /// Signs in with a username or email.
    ///
    /// On success the session holds the returned identity and tokens and
    /// is persisted for the next run. On failure the session returns to
    /// anonymous with the server's message attached, and the error is
    /// also returned to the caller.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<UserIdentity> {
        self.session().login_started().await;

        let spec = RequestSpec::post(
            "login/",
            serde_json::json!({ "identifier": identifier, "password": password }),
        )
        .unauthenticated();

        let body = match self.fetch_json::<Value>(&spec).await {
            Ok(body) => body,
            Err(error) => {
                self.session().login_failed(login_error_text(&error)).await;
                return Err(error);
            }
        };

        let Some(access) = wire::extract_access_token(&body) else {
            let message = "login response carried no access token";
            self.session().login_failed(message).await;
            return Err(OutlayError::Transport {
                message: message.into(),
                source: None,
            });
        };
        let refresh = body
            .get("refresh")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        // Some deployments return only tokens; fall back to a minimal
        // identity built from the identifier.
        let identity = body
            .get("user")
            .cloned()
            .and_then(|user| serde_json::from_value::<UserIdentity>(user).ok())
            .unwrap_or_else(|| UserIdentity {
                id: 0,
                username: identifier.to_owned(),
                email: String::new(),
                is_staff: false,
            });

        info!(username = %identity.username, "login accepted");
        self.session()
            .login_succeeded(
                identity.clone(),
                SecretString::from(access),
                SecretString::from(refresh),
            )
            .await?;
        Ok(identity)
    }

    /// Signs out. The server is notified best-effort; local session
    /// state is cleared no matter what it answers.
    pub async fn logout(&self) -> Result<()> {
        if let Some(refresh) = self.session().refresh_token().await {
            let spec = RequestSpec::post("logout/", serde_json::json!({ "refresh": refresh }));
            if let Err(error) = self.fetch_empty(&spec).await {
                warn!(error = %error, "server-side logout failed, clearing local session anyway");
            }
        }
        self.session().logout().await
    }

    /// Requests a password-reset OTP for the given email. The server
    /// answers the same way whether or not the account exists.
    pub async fn forgot_password(&self, email: &str) -> Result<String> {
        let spec = RequestSpec::post("forgot-password/", serde_json::json!({ "email": email }))
            .unauthenticated();
        let body = self.fetch_json::<Value>(&spec).await?;
        Ok(wire::extract_message(&body))
    }

    /// Exchanges a received OTP for a short-lived reset token.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<OtpVerification> {
        let spec = RequestSpec::post(
            "verify-otp/",
            serde_json::json!({ "email": email, "otp": otp }),
        )
        .unauthenticated();
        self.fetch_json(&spec).await
    }

    /// Completes the recovery flow by setting a new password.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<String> {
        let spec = RequestSpec::post(
            "reset-password/",
            serde_json::json!({
                "reset_token": reset_token,
                "new_password": new_password,
                "confirm_password": confirm_password,
            }),
        )
        .unauthenticated();
        let body = self.fetch_json::<Value>(&spec).await?;
        Ok(wire::extract_message(&body))
    }
}

/// Text stored on the session after a failed login. Server messages
/// pass through verbatim; transport problems get a generic line.
fn login_error_text(error: &OutlayError) -> String {
    match error {
        OutlayError::Api { message, .. } => message.clone(),
        _ => "could not reach the server, please try again".to_owned(),
    }
}
