//! Gemini structured-output client — the analysis backend core.
//!
//! One `generateContent` request per analysis, carrying the fixed rubric
//! instruction and the response schema from [`crate::rubric`]. A single
//! attempt, no retry or backoff: a failed analysis is surfaced to the user
//! and the whole action is retryable from the top.
//!
//! This is the only component that holds the model credential. The key is
//! sent as a request header and never appears in errors or logs.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AdvisorError;
use crate::rubric;
use crate::types::AnalysisResult;

/// Cap on upstream error bodies quoted back in error messages.
const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    pub model: String,
    pub base_url: String,
    pub default_timeout: Duration,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`: model-access credential
    ///
    /// Optional:
    /// - `GEMINI_MODEL` (default "gemini-2.5-flash")
    /// - `GEMINI_BASE_URL` (default Google generative-language endpoint)
    /// - `GEMINI_TIMEOUT_SECS` (default 120)
    pub fn from_env() -> Result<Self, AdvisorError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            AdvisorError::Configuration(
                "GEMINI_API_KEY environment variable is not set".to_string(),
            )
        })?;

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();

        let default_timeout = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(120));

        Ok(Self {
            api_key,
            model,
            base_url,
            default_timeout,
        })
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credential stays out of Debug output.
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentPayload,
    contents: Vec<ContentPayload>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ContentPayload {
    parts: Vec<TextPart>,
}

impl ContentPayload {
    fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![TextPart { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiErrorObject>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorObject,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorObject {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AdvisorError> {
        let http = reqwest::Client::builder()
            .user_agent("proposal-advisor/gemini-client")
            .build()
            .map_err(|e| AdvisorError::Upstream(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Analyze extracted proposal text against the rubric.
    ///
    /// Fails with `Validation` on empty input, `Upstream` when the model
    /// call fails or its reply does not parse as the declared schema.
    /// On success the parsed result is returned unmodified — structural
    /// validation only, no semantic checks on rubric content.
    pub async fn analyze(&self, proposal_text: &str) -> Result<AnalysisResult, AdvisorError> {
        if proposal_text.trim().is_empty() {
            return Err(AdvisorError::Validation(
                "proposal text is empty".to_string(),
            ));
        }

        let request = GenerateContentRequest {
            system_instruction: ContentPayload::text(rubric::SYSTEM_INSTRUCTION),
            contents: vec![ContentPayload::text(rubric::user_prompt(proposal_text))],
            generation_config: GenerationConfig {
                temperature: 0.2,
                response_mime_type: "application/json".to_string(),
                response_schema: rubric::response_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        debug!(
            model = %self.config.model,
            rubric = rubric::RUBRIC_VERSION,
            chars = proposal_text.len(),
            "sending analysis request"
        );

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .timeout(self.config.default_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdvisorError::Upstream(format!("model request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(to_upstream_error(resp).await);
        }

        let response: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AdvisorError::Upstream(format!("invalid model response: {e}")))?;

        let text = candidate_text(response)?;
        parse_analysis(&text)
    }
}

/// Pull the concatenated text parts out of the first candidate.
fn candidate_text(response: GenerateContentResponse) -> Result<String, AdvisorError> {
    if let Some(error) = response.error {
        return Err(AdvisorError::Upstream(format!(
            "model error: {}",
            error.message
        )));
    }

    let content = response
        .candidates
        .and_then(|mut c| if c.is_empty() { None } else { c.remove(0).content })
        .ok_or_else(|| {
            AdvisorError::Upstream("model response contained no candidates".to_string())
        })?;

    let text: String = content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(AdvisorError::Upstream(
            "model response contained no text".to_string(),
        ));
    }
    Ok(text)
}

/// Parse the model's JSON text as an [`AnalysisResult`].
fn parse_analysis(text: &str) -> Result<AnalysisResult, AdvisorError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        AdvisorError::Upstream(format!("model response did not match the analysis schema: {e}"))
    })
}

async fn to_upstream_error(resp: reqwest::Response) -> AdvisorError {
    let status = resp.status();
    let body = read_limited_text(resp).await;
    if let Ok(parsed) = serde_json::from_str::<GeminiErrorEnvelope>(&body) {
        return AdvisorError::Upstream(format!(
            "model call failed (status {status}): {}",
            parsed.error.message
        ));
    }
    AdvisorError::Upstream(format!("model call failed (status {status}): {body}"))
}

async fn read_limited_text(resp: reqwest::Response) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > MAX_ERROR_BODY_BYTES {
                b.truncate(MAX_ERROR_BODY_BYTES);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": { "parts": [{"text": "{\"a\":"}, {"text": " 1}"}] }
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(candidate_text(response).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_candidate_text_surfaces_error_envelope() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{ "error": { "message": "API key not valid" } }"#,
        )
        .unwrap();
        let err = candidate_text(response).unwrap_err();
        assert!(matches!(err, AdvisorError::Upstream(m) if m.contains("API key not valid")));
    }

    #[test]
    fn test_candidate_text_rejects_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{ "candidates": [] }"#).unwrap();
        assert!(matches!(
            candidate_text(response),
            Err(AdvisorError::Upstream(_))
        ));
    }

    #[test]
    fn test_parse_analysis_accepts_schema_shaped_json() {
        let json = r#"{
            "advisorSummary": {
                "status": "GO",
                "keyRisk": "ความเสี่ยง",
                "discussionPoint": "ประเด็น"
            },
            "strengths": ["จุดเด่น"],
            "areasForImprovement": ["ควรปรับปรุง"],
            "scores": {
                "problemClarityInContext": {"score": 8, "reason": "ชัดเจน"},
                "measurableObjectives": {"score": 7, "reason": "วัดได้"},
                "scopeAndTimelineFeasibility": {"score": 6, "reason": "พอเหมาะ"},
                "methodologyInPractice": {"score": 7, "reason": "ทำได้จริง"},
                "synergyAndValueForCompany": {"score": 9, "reason": "มีคุณค่า"}
            },
            "summary": "สรุป",
            "redFlags": [],
            "actionableNextSteps": ["ขั้นตอน"],
            "probingQuestions": ["คำถาม?"]
        }"#;
        let result = parse_analysis(json).unwrap();
        assert_eq!(result.scores.synergy_and_value_for_company.score, 9);
        assert!(result.red_flags.is_empty());
    }

    #[test]
    fn test_parse_analysis_rejects_missing_fields() {
        let err = parse_analysis(r#"{"strengths": []}"#).unwrap_err();
        assert!(matches!(err, AdvisorError::Upstream(_)));
    }

    #[test]
    fn test_parse_analysis_rejects_malformed_json() {
        assert!(matches!(
            parse_analysis("not json at all"),
            Err(AdvisorError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_input_before_any_request() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            default_timeout: Duration::from_secs(1),
        })
        .unwrap();
        let err = client.analyze("   \n  ").await.unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
    }
}
