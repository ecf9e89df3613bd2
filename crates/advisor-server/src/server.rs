//! Router and request handlers for the analysis endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use advisor_core::error::AdvisorError;
use advisor_core::gemini::GeminiClient;
use advisor_core::types::AnalysisResult;

#[derive(Clone)]
pub struct AppState {
    /// Present only when the credential was available at startup. Requests
    /// answer 500 per call when it is absent; the server itself stays up
    /// so `/health` keeps working for orchestration.
    pub gemini: Option<Arc<GeminiClient>>,
}

/// Create the router with all routes.
///
/// `/api/analyze` is registered for POST only — axum answers 405 for any
/// other method on the path.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .with_state(state)
}

/// Health check endpoint for container orchestration.
async fn health() -> impl IntoResponse {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct AnalyzeBody {
    #[serde(rename = "proposalText")]
    proposal_text: Option<String>,
}

/// Run one rubric analysis over the submitted proposal text.
///
/// One logical operation per request: no server-side retry, no
/// cancellation, no state shared across requests.
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let text = body.proposal_text.as_deref().unwrap_or("").trim();
    if text.is_empty() {
        return Err(ApiError(AdvisorError::Validation(
            "proposalText is required".to_string(),
        )));
    }

    let gemini = state.gemini.as_ref().ok_or_else(|| {
        ApiError(AdvisorError::Configuration(
            "GEMINI_API_KEY environment variable is not set on the server".to_string(),
        ))
    })?;

    info!(chars = text.len(), "analysis request received");
    let result = gemini.analyze(text).await.map_err(ApiError)?;
    info!(
        status = result.advisor_summary.status.as_str(),
        "analysis complete"
    );
    Ok(Json(result))
}

/// Maps the error taxonomy onto HTTP statuses with a `{"error": ...}` body.
struct ApiError(AdvisorError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AdvisorError::Validation(_) => StatusCode::BAD_REQUEST,
            // Configuration and upstream failures both surface as 500 to
            // the caller; the distinction stays in the message and logs.
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "analysis request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_router(AppState { gemini: None })
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_proposal_text_is_400() {
        let response = test_app().oneshot(analyze_request("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = error_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("proposalText"));
    }

    #[tokio::test]
    async fn test_blank_proposal_text_is_400() {
        let response = test_app()
            .oneshot(analyze_request(r#"{"proposalText": "   \n "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_post_method_is_405() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/analyze")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_missing_credential_is_500_with_error_body() {
        let response = test_app()
            .oneshot(analyze_request(r#"{"proposalText": "ข้อเสนอโครงงานทดสอบ"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = error_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
    }
}
