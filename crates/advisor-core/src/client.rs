//! HTTP client for the analysis backend.
//!
//! One request per invocation, no retry — any retry policy belongs to the
//! caller (none is implemented). Transport failures and non-success
//! statuses map onto the two client-side error classes.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AdvisorError;
use crate::types::AnalysisResult;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    #[serde(rename = "proposalText")]
    proposal_text: &'a str,
}

#[derive(Clone, Debug)]
pub struct AnalysisClient {
    base_url: String,
    http: reqwest::Client,
}

impl AnalysisClient {
    /// `base_url` is the backend root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Result<Self, AdvisorError> {
        let http = reqwest::Client::builder()
            .user_agent("proposal-advisor/analysis-client")
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(AdvisorError::Network)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Submit extracted proposal text and return the structured result.
    ///
    /// `Network` on transport failure, `Server` on a non-2xx response
    /// (carrying the server-supplied message when present).
    pub async fn analyze(&self, proposal_text: &str) -> Result<AnalysisResult, AdvisorError> {
        let url = format!("{}/api/analyze", self.base_url);
        debug!(url = %url, chars = proposal_text.len(), "submitting analysis request");

        let resp = self
            .http
            .post(&url)
            .json(&AnalyzeRequest { proposal_text })
            .send()
            .await
            .map_err(AdvisorError::Network)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(server_error(status.as_u16(), &body));
        }

        resp.json::<AnalysisResult>().await.map_err(AdvisorError::Network)
    }
}

/// Map a non-success response to `ServerError`, preferring the
/// server-supplied `{"error": ...}` message over a generic one.
fn server_error(status: u16, body: &str) -> AdvisorError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| format!("server responded with status {status}"));
    AdvisorError::Server { status, message }
}
