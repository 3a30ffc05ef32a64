//! HTTP API data models.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use mfgchat_core::api::{AdmissionOutcome, ComposedRejection, REJECTED_ERROR_MESSAGE};

// ============= Query =============

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub session_id: String,
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub session_id: String,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_url: Option<String>,
    pub analysis_results: Value,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl QueryResponse {
    /// The fixed shape for a gate-rejected query. Same message catalog as the
    /// CLI, plus the machine-readable filter fields.
    pub fn rejected(session_id: String, rejection: &ComposedRejection) -> Self {
        Self {
            session_id,
            response: rejection.message.to_string(),
            chart_url: None,
            analysis_results: serde_json::json!({ "filter_status": "rejected" }),
            success: false,
            error_message: Some(REJECTED_ERROR_MESSAGE.to_string()),
        }
    }
}

// ============= Filter check =============

#[derive(Debug, Deserialize)]
pub struct FilterCheckRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct FilterCheckResponse {
    pub allowed: bool,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl FilterCheckResponse {
    pub fn from_outcome(outcome: &AdmissionOutcome, rejection: Option<&ComposedRejection>) -> Self {
        Self {
            allowed: outcome.is_allowed(),
            outcome: outcome.code(),
            category: outcome.signal().map(|s| s.category.as_str()),
            message: rejection.map(|r| r.message),
        }
    }
}

// ============= Sessions / health =============

#[derive(Debug, Serialize)]
pub struct SessionEntry {
    pub session_id: String,
    pub created_at: String,
    pub last_query_at: String,
    pub query_count: u64,
    pub rejected_count: u64,
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub success: bool,
    pub sessions: Vec<SessionEntry>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub session_id: String,
    pub llm_available: bool,
    pub uptime_seconds: i64,
    pub requests_total: u64,
    pub errors_total: u64,
}

// ============= Errors =============

/// Infrastructure failures only. Gate rejections are not errors; they travel
/// as a well-formed `QueryResponse` with `success: false`.
#[derive(Debug)]
pub enum HttpServerError {
    InvalidRequest(String),
    LlmUnavailable(String),
    LlmBackend(String),
    Internal(String),
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            Self::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "LLM_UNAVAILABLE", msg),
            Self::LlmBackend(msg) => (StatusCode::BAD_GATEWAY, "LLM_BACKEND_ERROR", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = serde_json::json!({
            "success": false,
            "error": message,
            "error_code": error_code,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfgchat_core::api::{compose_rejection, FilterConfig, QueryGate, OFF_DOMAIN_MESSAGE};
    use pretty_assertions::assert_eq;

    #[test]
    fn query_request_deserializes() {
        let json = r#"{"session_id":"s1","query":"show production trends"}"#;
        let req: QueryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session_id, "s1");
        assert_eq!(req.query, "show production trends");
    }

    #[test]
    fn rejected_response_matches_contract() {
        let gate = QueryGate::from_config(&FilterConfig::default()).unwrap();
        let outcome = gate.classify("what's the weather today?");
        let rejection = compose_rejection(&outcome).unwrap();

        let resp = QueryResponse::rejected("s1".into(), &rejection);
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["session_id"], "s1");
        assert_eq!(value["success"], false);
        assert_eq!(
            value["error_message"],
            "Query rejected by manufacturing domain safety filter"
        );
        assert_eq!(value["analysis_results"]["filter_status"], "rejected");
        // Byte-identical to the catalog the CLI prints.
        assert_eq!(value["response"], OFF_DOMAIN_MESSAGE);
        assert!(value.get("chart_url").is_none());
    }

    #[test]
    fn filter_check_response_for_allowed_query() {
        let gate = QueryGate::from_config(&FilterConfig::default()).unwrap();
        let outcome = gate.classify("show me production trends");
        let resp = FilterCheckResponse::from_outcome(&outcome, None);
        assert!(resp.allowed);
        assert_eq!(resp.outcome, "allowed");
        assert!(resp.message.is_none());
    }
}
