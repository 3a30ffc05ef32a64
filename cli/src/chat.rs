//! CLI collaborator: one-shot ask, gate check, and the interactive chat loop.
//!
//! Every path classifies through the gate first; rejected queries print the
//! composed catalog message and never reach the LLM pipeline.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use mfgchat_core::api::{compose_rejection, AppConfig, CliError, LlmSystem, QueryGate};

use crate::commands::cli::{AskArgs, CheckArgs};

pub const EXAMPLE_QUESTIONS: &str = "\
Example questions:

Production analysis:
  - Show me production trends over the last month
  - Which production line has the highest output?
  - Compare efficiency between different shifts

Quality analysis:
  - What's the defect rate trend?
  - Which operator has the lowest defect rate?
  - Show me quality metrics by product line

Efficiency and performance:
  - What are the top performing machines?
  - Show downtime analysis by equipment
  - Compare OEE across production lines

Data insights:
  - Summarize last week's production data
  - Find correlations between variables
  - Show me outliers in the data";

pub async fn run_ask(args: AskArgs, gate: &QueryGate, cfg: &AppConfig) -> Result<i32, CliError> {
    let query = args.query.join(" ");
    let outcome = gate.classify(&query);

    if let Some(rejection) = compose_rejection(&outcome) {
        info!(outcome = outcome.code(), "query declined");
        println!("{}", rejection.message);
        return Ok(0);
    }

    let llm = LlmSystem::new(&cfg.llm)?;
    let instructions = llm.analyze(&query, args.context.as_deref()).await?;

    if let Some(title) = &instructions.title {
        println!("{title}");
        println!();
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&instructions).map_err(|e| CliError::Command(e.to_string()))?
    );
    Ok(0)
}

pub fn run_check(args: CheckArgs, gate: &QueryGate) -> Result<i32, CliError> {
    let query = args.query.join(" ");
    let outcome = gate.classify(&query);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).map_err(|e| CliError::Command(e.to_string()))?
        );
    } else {
        match compose_rejection(&outcome) {
            None => println!("allowed"),
            Some(rejection) => {
                println!("{}", rejection.error_code);
                println!("{}", rejection.message);
            }
        }
    }

    Ok(if outcome.is_allowed() { 0 } else { 2 })
}

pub async fn run_interactive(gate: &QueryGate, cfg: &AppConfig) -> Result<i32, CliError> {
    let llm = LlmSystem::new(&cfg.llm)?;
    let interactive = atty::is(atty::Stream::Stdin);

    if interactive {
        println!("Manufacturing data chatbot. Ask about your production data.");
        println!("Type 'examples' for sample questions, 'quit' to exit.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        if interactive {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "examples" => {
                println!("{EXAMPLE_QUESTIONS}");
                continue;
            }
            query => {
                let outcome = gate.classify(query);
                if let Some(rejection) = compose_rejection(&outcome) {
                    info!(outcome = outcome.code(), "query declined");
                    println!("{}", rejection.message);
                    continue;
                }

                match llm.analyze(query, None).await {
                    Ok(instructions) => {
                        if let Some(title) = &instructions.title {
                            println!("{title}");
                        }
                        if let Some(focus) = &instructions.insights_focus {
                            println!("{focus}");
                        }
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&instructions)
                                .map_err(|e| CliError::Command(e.to_string()))?
                        );
                    }
                    Err(e) => {
                        // A backend failure ends one exchange, not the session.
                        eprintln!("analysis failed: {e}");
                    }
                }
            }
        }
    }

    if interactive {
        println!("Goodbye.");
    }
    Ok(0)
}
