use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "mfgchat",
    version,
    about = "Manufacturing data analysis chatbot"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct AskArgs {
    /// The question to ask. Joined with spaces when given as multiple words.
    #[arg(trailing_var_arg = true, required = true)]
    pub query: Vec<String>,

    /// Optional dataset context forwarded to the analysis model (e.g. a
    /// column listing).
    #[arg(long)]
    pub context: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckArgs {
    /// The query to classify. No LLM call is made.
    #[arg(trailing_var_arg = true, required = true)]
    pub query: Vec<String>,

    /// Emit the outcome as JSON instead of human-readable text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HttpServerArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Server session id; generated when omitted.
    #[arg(long)]
    pub session_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a single question and print the analysis instructions.
    Ask(AskArgs),
    /// Interactive chat session on stdin/stdout.
    Chat,
    /// Classify a query through the admission gate without calling the LLM.
    Check(CheckArgs),
    /// Print example questions the assistant can answer.
    Examples,
    /// Serve the HTTP API.
    HttpServer(HttpServerArgs),
}
