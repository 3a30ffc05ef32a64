use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("llm error: {0}")]
    Llm(#[from] LlmError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("no API key configured (set MFGCHAT_GEMINI_API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,
    #[error("request to LLM backend failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("LLM backend returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("LLM backend returned an empty reply")]
    EmptyReply,
}
