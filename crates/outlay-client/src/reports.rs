// SPDX-FileCopyrightText: 2026 Outlay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expense report downloads.
//!
//! Reports are rendered server-side and streamed back as a binary
//! attachment. The client accumulates the stream and surfaces the
//! filename the server suggests in `Content-Disposition`.

use chrono::NaiveDate;
use futures::StreamExt;
use outlay_core::error::Result;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};

use crate::client::{transport_error, ApiClient, RequestSpec};

/// Server-side report renderings on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Excel,
    Pdf,
}

impl ReportFormat {
    fn path(self) -> &'static str {
        match self {
            ReportFormat::Excel => "reports/excel/",
            ReportFormat::Pdf => "reports/pdf/",
        }
    }

    /// Used when the server sends no usable filename.
    fn default_filename(self) -> &'static str {
        match self {
            ReportFormat::Excel => "expense_report.xlsx",
            ReportFormat::Pdf => "expense_report.pdf",
        }
    }
}

/// A downloaded report, ready to hand to the user.
#[derive(Debug, Clone)]
pub struct ReportDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    /// Generates and downloads an expense report. A date range narrows
    /// the report to expenses created within it (inclusive); `None`
    /// covers all records.
    pub async fn download_report(
        &self,
        format: ReportFormat,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<ReportDownload> {
        let body = match range {
            Some((start, end)) => serde_json::json!({
                "start_date": start.to_string(),
                "end_date": end.to_string(),
            }),
            None => serde_json::json!({}),
        };

        let response = self.execute(&RequestSpec::post(format.path(), body)).await?;
        let filename = filename_from_disposition(response.headers())
            .unwrap_or_else(|| format.default_filename().to_owned());

        let mut stream = response.bytes_stream();
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transport_error("report download interrupted", e))?;
            bytes.extend_from_slice(&chunk);
        }

        Ok(ReportDownload { filename, bytes })
    }
}

/// Extracts the filename from `attachment; filename="..."`.
fn filename_from_disposition(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    let (_, after) = raw.split_once("filename=")?;
    let name = after
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches('"');
    (!name.is_empty()).then(|| name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use outlay_core::types::UserIdentity;
    use outlay_session::SessionHandle;
    use secrecy::SecretString;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApiClient {
        let session = SessionHandle::ephemeral();
        session
            .login_succeeded(
                UserIdentity {
                    id: 1,
                    username: "admin".into(),
                    email: "admin@example.com".into(),
                    is_staff: true,
                },
                SecretString::from("access-1".to_string()),
                SecretString::from("refresh-1".to_string()),
            )
            .await
            .unwrap();
        ApiClient::new(&server.uri(), Duration::from_secs(5), session).unwrap()
    }

    #[test]
    fn disposition_parsing_handles_quotes_and_extras() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_DISPOSITION,
            "attachment; filename=\"report_2026.xlsx\"".parse().unwrap(),
        );
        assert_eq!(
            filename_from_disposition(&headers).as_deref(),
            Some("report_2026.xlsx")
        );

        headers.insert(
            CONTENT_DISPOSITION,
            "attachment; filename=plain.pdf; size=123".parse().unwrap(),
        );
        assert_eq!(
            filename_from_disposition(&headers).as_deref(),
            Some("plain.pdf")
        );

        headers.insert(CONTENT_DISPOSITION, "inline".parse().unwrap());
        assert!(filename_from_disposition(&headers).is_none());
    }

    #[tokio::test]
    async fn ranged_download_sends_iso_dates_and_keeps_the_filename() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reports/excel/"))
            .and(body_json(serde_json::json!({
                "start_date": "2026-01-01",
                "end_date": "2026-01-31"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(
                        "content-disposition",
                        "attachment; filename=\"expense_report_2026-01-01_to_2026-01-31.xlsx\"",
                    )
                    .set_body_bytes(b"PK\x03\x04fake-xlsx".to_vec()),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let report = client
            .download_report(ReportFormat::Excel, Some((start, end)))
            .await
            .unwrap();

        assert_eq!(report.filename, "expense_report_2026-01-01_to_2026-01-31.xlsx");
        assert!(report.bytes.starts_with(b"PK\x03\x04"));
    }

    #[tokio::test]
    async fn unranged_download_falls_back_to_a_default_filename() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reports/pdf/"))
            .and(body_json(serde_json::json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 fake".to_vec()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let report = client
            .download_report(ReportFormat::Pdf, None)
            .await
            .unwrap();

        assert_eq!(report.filename, "expense_report.pdf");
        assert!(report.bytes.starts_with(b"%PDF"));
    }
}
