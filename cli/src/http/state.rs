//! Shared HTTP server state.

use chrono::{DateTime, Local};
use mfgchat_core::api::{LlmSystem, QueryGate};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Application state shared by all handlers. The gate is immutable for the
/// process lifetime; handlers only read it, so classification runs lock-free.
#[derive(Clone)]
pub struct AppState {
    pub server_session_id: String,
    pub gate: Arc<QueryGate>,
    /// `None` when no API key is configured; `/api/v1/query` then reports the
    /// pipeline unavailable for admitted queries (the gate still works).
    pub llm: Option<Arc<LlmSystem>>,
    pub sessions: Arc<RwLock<HashMap<String, SessionInfo>>>,
    pub stats: Arc<RwLock<ServerStats>>,
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(
        server_session_id: String,
        gate: Arc<QueryGate>,
        llm: Option<Arc<LlmSystem>>,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            server_session_id,
            gate,
            llm,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(ServerStats::new())),
            shutdown_tx,
        }
    }

    /// Record one query against a session, creating the session lazily.
    pub fn touch_session(&self, session_id: &str, rejected: bool) {
        let mut sessions = self.sessions.write().unwrap();
        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionInfo::new(session_id));
        entry.query_count += 1;
        if rejected {
            entry.rejected_count += 1;
        }
        entry.last_query_at = Local::now();
    }
}

/// Per-session bookkeeping for `/api/v1/sessions`.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub session_id: String,
    pub created_at: DateTime<Local>,
    pub last_query_at: DateTime<Local>,
    pub query_count: u64,
    pub rejected_count: u64,
}

impl SessionInfo {
    fn new(session_id: &str) -> Self {
        let now = Local::now();
        Self {
            session_id: session_id.to_string(),
            created_at: now,
            last_query_at: now,
            query_count: 0,
            rejected_count: 0,
        }
    }
}

/// Server counters.
pub struct ServerStats {
    pub requests_total: u64,
    pub requests_by_endpoint: HashMap<String, u64>,
    pub errors_total: u64,
    pub start_time: DateTime<Local>,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            requests_total: 0,
            requests_by_endpoint: HashMap::new(),
            errors_total: 0,
            start_time: Local::now(),
        }
    }

    pub fn increment_request(&mut self, endpoint: &str) {
        self.requests_total += 1;
        *self
            .requests_by_endpoint
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    pub fn increment_error(&mut self) {
        self.errors_total += 1;
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Local::now() - self.start_time).num_seconds()
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfgchat_core::api::FilterConfig;

    fn state() -> AppState {
        let (tx, _) = broadcast::channel(1);
        let gate = Arc::new(QueryGate::from_config(&FilterConfig::default()).unwrap());
        AppState::new("test".into(), gate, None, tx)
    }

    #[test]
    fn touch_session_tracks_counts() {
        let s = state();
        s.touch_session("abc", false);
        s.touch_session("abc", true);
        s.touch_session("xyz", false);

        let sessions = s.sessions.read().unwrap();
        assert_eq!(sessions.len(), 2);
        let abc = &sessions["abc"];
        assert_eq!(abc.query_count, 2);
        assert_eq!(abc.rejected_count, 1);
    }
}
