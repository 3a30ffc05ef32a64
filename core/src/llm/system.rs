//! LLM pipeline collaborator.
//!
//! Receives only queries the admission gate has explicitly allowed; the gate
//! decision is a precondition here, not something this module re-checks.

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::LlmError;

use super::gemini::GeminiClient;
use super::instructions::{parse_reply, AnalysisInstructions};
use super::prompt::build_prompt;

/// Seam over the concrete model backend so callers and tests can substitute
/// the network client.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl AnalysisBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        GeminiClient::generate(self, prompt).await
    }
}

pub struct LlmSystem {
    backend: Box<dyn AnalysisBackend>,
}

impl LlmSystem {
    pub fn new(cfg: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self {
            backend: Box::new(GeminiClient::new(cfg)?),
        })
    }

    pub fn with_backend(backend: Box<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Turn an admitted query into structured analysis instructions.
    pub async fn analyze(
        &self,
        query: &str,
        data_context: Option<&str>,
    ) -> Result<AnalysisInstructions, LlmError> {
        let prompt = build_prompt(query, data_context);
        let reply = self.backend.generate(&prompt).await?;
        Ok(parse_reply(&reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedBackend(String);

    #[async_trait]
    impl AnalysisBackend for CannedBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn analyze_parses_backend_reply() {
        let system = LlmSystem::with_backend(Box::new(CannedBackend(
            r#"{"analysis_type":"comparison","metrics":["defects"],"title":"Shift comparison"}"#
                .into(),
        )));
        let out = system.analyze("compare shifts", None).await.unwrap();
        assert_eq!(out.analysis_type, "comparison");
        assert_eq!(out.title.as_deref(), Some("Shift comparison"));
    }

    #[tokio::test]
    async fn analyze_survives_prose_replies() {
        let system =
            LlmSystem::with_backend(Box::new(CannedBackend("a summary would be best".into())));
        let out = system.analyze("summarize the data", None).await.unwrap();
        assert_eq!(out.analysis_type, "summary");
    }
}
