// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expense category endpoints.

use outlay_core::error::Result;
use outlay_core::types::Category;

use crate::client::{ApiClient, RequestSpec};
use crate::wire::CategoryDto;

impl ApiClient {
    /// Fetches all active categories.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let dtos: Vec<CategoryDto> = self.fetch_json(&RequestSpec::get("categories/")).await?;
        Ok(dtos.into_iter().map(CategoryDto::normalize).collect())
    }

    pub async fn create_category(&self, name: &str) -> Result<Category> {
        let dto: CategoryDto = self
            .fetch_json(&RequestSpec::post(
                "categories/",
                serde_json::json!({ "name": name }),
            ))
            .await?;
        Ok(dto.normalize())
    }
}
