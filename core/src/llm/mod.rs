pub mod gemini;
pub mod instructions;
pub mod prompt;
pub mod system;

pub use gemini::GeminiClient;
pub use instructions::AnalysisInstructions;
pub use system::{AnalysisBackend, LlmSystem};
