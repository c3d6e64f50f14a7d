//! dbot CLI: chat with the configured LLM backend. Config from env (and `.env`).

use anyhow::{Context, Result};
use clap::Parser;
use conversation::{ConversationConfig, ConversationOrchestrator};
use dbot_cli::{run_repl, startup_check, Cli, Commands};
use dbot_core::init_tracing;
use llm_client::{build_llm_client, BackendConfig};
use tokio::io::BufReader;
use tracing::info;

const DEFAULT_LOG_FILE: &str = "logs/dbot.log";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let backend_config = BackendConfig::from_env().context("Load backend config from env")?;
    backend_config
        .validate()
        .context("Validate backend config")?;
    let conversation_config =
        ConversationConfig::from_env().context("Load conversation config from env")?;

    let log_file = std::env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    init_tracing(Some(&log_file))?;

    info!(
        provider = %backend_config.provider.as_str(),
        model = %backend_config.model,
        base_url = %backend_config.base_url(),
        "Starting dbot"
    );
    let llm = build_llm_client(&backend_config);
    let orchestrator = ConversationOrchestrator::new(llm, conversation_config);

    startup_check(&orchestrator, cli.no_check).await?;

    match cli.command {
        Commands::Chat { participant } => {
            run_repl(
                &orchestrator,
                &participant,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await
        }
        Commands::Ask { participant, text } => {
            let reply = orchestrator.handle(&participant, &text).await;
            println!("{}", reply);
            Ok(())
        }
    }
}
