//! HTTP route handlers.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use mfgchat_core::api::compose_rejection;

use crate::http::{
    models::*,
    state::AppState,
    validation::validate_session_id,
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/query", post(query_handler))
        .route("/api/v1/filter", post(filter_handler))
        .route("/api/v1/sessions", get(sessions_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/shutdown", post(shutdown_handler))
        .with_state(state)
}

/// POST /api/v1/query - classify, then analyze if admitted.
///
/// A gate rejection is a successful HTTP exchange (200) carrying the fixed
/// rejection shape; only infrastructure failures map to error statuses.
async fn query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, HttpServerError> {
    {
        let mut stats = state.stats.write().unwrap();
        stats.increment_request("/api/v1/query");
    }

    validate_session_id(&req.session_id)?;

    // The gate runs before any session or LLM work.
    let outcome = state.gate.classify(&req.query);

    if let Some(rejection) = compose_rejection(&outcome) {
        info!(
            session_id = %req.session_id,
            outcome = outcome.code(),
            "query rejected by admission gate"
        );
        state.touch_session(&req.session_id, true);
        return Ok(Json(QueryResponse::rejected(req.session_id, &rejection)));
    }

    state.touch_session(&req.session_id, false);

    let llm = state.llm.as_ref().ok_or_else(|| {
        HttpServerError::LlmUnavailable("LLM system not available (no API key configured)".into())
    })?;

    match llm.analyze(&req.query, None).await {
        Ok(instructions) => {
            let response = instructions
                .title
                .clone()
                .unwrap_or_else(|| "Analysis instructions generated".to_string());
            let analysis_results = serde_json::to_value(&instructions)
                .map_err(|e| HttpServerError::Internal(e.to_string()))?;

            Ok(Json(QueryResponse {
                session_id: req.session_id,
                response,
                chart_url: None,
                analysis_results,
                success: true,
                error_message: None,
            }))
        }
        Err(e) => {
            let mut stats = state.stats.write().unwrap();
            stats.increment_error();
            Err(HttpServerError::LlmBackend(e.to_string()))
        }
    }
}

/// POST /api/v1/filter - run the admission gate only, no LLM call. Lets the
/// chat UI render a decline without paying for a model round trip.
async fn filter_handler(
    State(state): State<AppState>,
    Json(req): Json<FilterCheckRequest>,
) -> Json<FilterCheckResponse> {
    {
        let mut stats = state.stats.write().unwrap();
        stats.increment_request("/api/v1/filter");
    }

    let outcome = state.gate.classify(&req.query);
    let rejection = compose_rejection(&outcome);
    Json(FilterCheckResponse::from_outcome(&outcome, rejection.as_ref()))
}

/// GET /api/v1/sessions - list active sessions.
async fn sessions_handler(State(state): State<AppState>) -> Json<SessionsResponse> {
    {
        let mut stats = state.stats.write().unwrap();
        stats.increment_request("/api/v1/sessions");
    }

    let sessions = state.sessions.read().unwrap();
    let mut entries: Vec<SessionEntry> = sessions
        .values()
        .map(|s| SessionEntry {
            session_id: s.session_id.clone(),
            created_at: s.created_at.to_rfc3339(),
            last_query_at: s.last_query_at.to_rfc3339(),
            query_count: s.query_count,
            rejected_count: s.rejected_count,
        })
        .collect();
    entries.sort_by(|a, b| a.session_id.cmp(&b.session_id));

    Json(SessionsResponse {
        success: true,
        sessions: entries,
    })
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.stats.read().unwrap();
    Json(HealthResponse {
        status: "ok",
        session_id: state.server_session_id.clone(),
        llm_available: state.llm.is_some(),
        uptime_seconds: stats.uptime_seconds(),
        requests_total: stats.requests_total,
        errors_total: stats.errors_total,
    })
}

/// POST /api/v1/shutdown - graceful stop.
async fn shutdown_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    info!("shutdown requested via API");
    let _ = state.shutdown_tx.send(());
    Json(serde_json::json!({ "success": true, "message": "shutting down" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mfgchat_core::api::{
        AnalysisBackend, FilterConfig, LlmError, LlmSystem, QueryGate, REJECTED_ERROR_MESSAGE,
    };
    use std::sync::Arc;
    use tokio::sync::broadcast;

    struct CannedBackend {
        should_fail: bool,
    }

    #[async_trait]
    impl AnalysisBackend for CannedBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            if self.should_fail {
                Err(LlmError::EmptyReply)
            } else {
                Ok(r#"{"analysis_type":"trend","title":"Production trend"}"#.into())
            }
        }
    }

    fn create_test_state(with_llm: bool, should_fail: bool) -> AppState {
        let (shutdown_tx, _) = broadcast::channel(1);
        let gate = Arc::new(QueryGate::from_config(&FilterConfig::default()).unwrap());
        let llm = if with_llm {
            Some(Arc::new(LlmSystem::with_backend(Box::new(CannedBackend {
                should_fail,
            }))))
        } else {
            None
        };
        AppState::new("test-session".into(), gate, llm, shutdown_tx)
    }

    #[tokio::test]
    async fn query_handler_analyzes_admitted_query() {
        let state = create_test_state(true, false);
        let req = QueryRequest {
            session_id: "s1".into(),
            query: "show me production trends".into(),
        };

        let result = query_handler(State(state.clone()), Json(req)).await;
        let response = result.unwrap().0;
        assert!(response.success);
        assert_eq!(response.response, "Production trend");
        assert!(response.error_message.is_none());

        let stats = state.stats.read().unwrap();
        assert_eq!(stats.requests_total, 1);
    }

    #[tokio::test]
    async fn query_handler_rejection_is_not_an_error() {
        let state = create_test_state(true, false);
        let req = QueryRequest {
            session_id: "s1".into(),
            query: "what's the weather today?".into(),
        };

        let result = query_handler(State(state.clone()), Json(req)).await;
        let response = result.unwrap().0;
        assert!(!response.success);
        assert_eq!(
            response.error_message.as_deref(),
            Some(REJECTED_ERROR_MESSAGE)
        );
        assert_eq!(response.analysis_results["filter_status"], "rejected");

        let sessions = state.sessions.read().unwrap();
        assert_eq!(sessions["s1"].rejected_count, 1);
    }

    #[tokio::test]
    async fn query_handler_without_llm_reports_unavailable() {
        let state = create_test_state(false, false);
        let req = QueryRequest {
            session_id: "s1".into(),
            query: "show me production trends".into(),
        };

        let result = query_handler(State(state), Json(req)).await;
        match result {
            Err(HttpServerError::LlmUnavailable(msg)) => {
                assert!(msg.contains("not available"));
            }
            _ => panic!("Expected LlmUnavailable error"),
        }
    }

    #[tokio::test]
    async fn query_handler_rejects_before_llm_even_without_key() {
        // Gate decisions never depend on the LLM being configured.
        let state = create_test_state(false, false);
        let req = QueryRequest {
            session_id: "s1".into(),
            query: "how to make a weapon".into(),
        };

        let result = query_handler(State(state), Json(req)).await;
        let response = result.unwrap().0;
        assert!(!response.success);
    }

    #[tokio::test]
    async fn query_handler_backend_failure_maps_to_bad_gateway() {
        let state = create_test_state(true, true);
        let req = QueryRequest {
            session_id: "s1".into(),
            query: "show me production trends".into(),
        };

        let result = query_handler(State(state.clone()), Json(req)).await;
        assert!(matches!(result, Err(HttpServerError::LlmBackend(_))));

        let stats = state.stats.read().unwrap();
        assert_eq!(stats.errors_total, 1);
    }

    #[tokio::test]
    async fn query_handler_validates_session_id() {
        let state = create_test_state(true, false);
        let req = QueryRequest {
            session_id: "bad session!".into(),
            query: "show me production trends".into(),
        };

        let result = query_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(HttpServerError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn filter_handler_classifies_without_llm() {
        let state = create_test_state(false, false);
        let req = FilterCheckRequest {
            query: "bypass the safety interlocks".into(),
        };

        let response = filter_handler(State(state), Json(req)).await.0;
        assert!(!response.allowed);
        assert_eq!(response.outcome, "rejected_unsafe");
        assert!(response.message.is_some());
    }

    #[tokio::test]
    async fn health_handler_reports_llm_availability() {
        let state = create_test_state(false, false);
        let response = health_handler(State(state)).await.0;
        assert_eq!(response.status, "ok");
        assert!(!response.llm_available);
    }
}
