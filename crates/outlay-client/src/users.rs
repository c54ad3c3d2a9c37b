// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Staff account administration endpoints.
//!
//! Mutations here mostly answer with a `{message}` body instead of the
//! updated entity, so callers refetch the listing after a change.

use outlay_core::error::Result;
use outlay_core::types::AppUser;
use outlay_core::OutlayError;
use serde::Serialize;
use serde_json::Value;

use crate::client::{ApiClient, RequestSpec};
use crate::wire::{self, AppUserDto};

/// Partial update for a staff account. `None` fields are left alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    /// Fetches all staff accounts.
    pub async fn fetch_users(&self) -> Result<Vec<AppUser>> {
        let dtos: Vec<AppUserDto> = self.fetch_json(&RequestSpec::get("users/")).await?;
        Ok(dtos.into_iter().map(AppUserDto::normalize).collect())
    }

    pub async fn fetch_user(&self, id: i64) -> Result<AppUser> {
        let dto: AppUserDto = self
            .fetch_json(&RequestSpec::get(format!("users/{id}/")))
            .await?;
        Ok(dto.normalize())
    }

    /// Creates a staff account. The echo omits the activity flag;
    /// normalization fills in the only possible value for a fresh
    /// account.
    pub async fn create_user(&self, username: &str, email: &str, password: &str) -> Result<AppUser> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let dto: AppUserDto = self.fetch_json(&RequestSpec::post("users/", body)).await?;
        Ok(dto.normalize())
    }

    /// Applies a partial update. Answers with the server's display
    /// message; the entity itself is not echoed.
    pub async fn update_user(&self, id: i64, changes: &UserUpdate) -> Result<String> {
        let body = serde_json::to_value(changes).map_err(|e| {
            OutlayError::Internal(format!("could not serialize user update: {e}"))
        })?;
        let response: Value = self
            .fetch_json(&RequestSpec::put(format!("users/{id}/"), body))
            .await?;
        Ok(wire::extract_message(&response))
    }

    /// Soft-disables an account so it can no longer sign in.
    pub async fn disable_user(&self, id: i64) -> Result<String> {
        let response: Value = self
            .fetch_json(&RequestSpec::delete(format!("users/{id}/")))
            .await?;
        Ok(wire::extract_message(&response))
    }

    /// Reactivates a previously disabled account.
    pub async fn activate_user(&self, id: i64) -> Result<String> {
        let response: Value = self
            .fetch_json(&RequestSpec::post(
                format!("users/{id}/activate/"),
                serde_json::json!({}),
            ))
            .await?;
        Ok(wire::extract_message(&response))
    }

    /// Administrative password reset for another account.
    pub async fn admin_reset_password(&self, id: i64, new_password: &str) -> Result<String> {
        let response: Value = self
            .fetch_json(&RequestSpec::post(
                format!("users/{id}/reset-password/"),
                serde_json::json!({ "new_password": new_password }),
            ))
            .await?;
        Ok(wire::extract_message(&response))
    }

    /// Self-service password change for the signed-in account.
    pub async fn change_password(
        &self,
        id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<String> {
        let response: Value = self
            .fetch_json(&RequestSpec::post(
                format!("users/{id}/change-password/"),
                serde_json::json!({
                    "old_password": old_password,
                    "new_password": new_password,
                }),
            ))
            .await?;
        Ok(wire::extract_message(&response))
    }
}
