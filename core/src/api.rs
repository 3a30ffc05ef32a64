//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `mfgchat_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, AppConfig, FilterConfig, HttpServerConfig, LlmConfig, LoggingConfig,
};
pub use crate::error::{CliError, LlmError};
pub use crate::filter::{
    compose_rejection, AdmissionOutcome, ClassificationSignal, ComposedRejection, QueryGate,
    SignalCategory, OFF_DOMAIN_MESSAGE, REJECTED_ERROR_MESSAGE, SAFETY_BLOCKED_MESSAGE,
};
pub use crate::llm::{AnalysisBackend, AnalysisInstructions, GeminiClient, LlmSystem};
