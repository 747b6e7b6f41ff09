//! ragchat - ask questions with retrieved context.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ragchat_agent::{AgentConfig, ConversationAgent, create_conversation_agent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn,ragchat=info,ragchat_agent=info,ragchat_embeddings=info";

#[derive(Parser, Debug)]
#[command(name = "ragchat")]
#[command(about = "Retrieval-augmented chat over an OpenAI-compatible API")]
struct Cli {
    /// Replace the default system prompt
    #[arg(long, global = true)]
    system_prompt: Option<String>,

    /// Chat model used for completions
    #[arg(long, global = true)]
    model: Option<String>,

    /// Print the transcript as JSON to stderr before exiting
    #[arg(long, global = true)]
    show_transcript: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask a single question and print the reply
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Read questions from stdin, one per line
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AgentConfig::from_env();
    if let Some(prompt) = &cli.system_prompt {
        config = config.with_system_prompt(prompt.as_str());
    }
    if let Some(model) = &cli.model {
        config = config.with_completion_model(model.as_str());
    }

    let mut agent = create_conversation_agent(&config)?;
    info!("Running in {} mode", agent.mode());

    let outcome = match &cli.command {
        Command::Ask { question } => run_ask(&mut agent, &question.join(" ")).await,
        Command::Chat => run_chat(&mut agent).await,
    };

    if cli.show_transcript {
        eprintln!("{}", serde_json::to_string_pretty(agent.transcript().turns())?);
    }

    outcome
}

async fn run_ask(agent: &mut ConversationAgent, question: &str) -> Result<()> {
    let reply = agent.ask(question).await?;
    println!("{reply}");
    Ok(())
}

async fn run_chat(agent: &mut ConversationAgent) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(question) = parse_input(&line) else {
            continue;
        };
        if is_exit(question) {
            break;
        }

        match agent.ask(question).await {
            Ok(reply) => println!("{reply}"),
            Err(e) => warn!("Failed to answer: {e}"),
        }
    }

    Ok(())
}

/// Trimmed question text, or `None` for a blank line.
fn parse_input(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn is_exit(input: &str) -> bool {
    matches!(input.to_ascii_lowercase().as_str(), "exit" | "quit")
}
