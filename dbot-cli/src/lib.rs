//! # dbot-cli
//!
//! Argument parsing and the terminal chat loop. Backend and session logic live in
//! `conversation` and `llm-client`.

pub mod cli;
pub mod repl;

pub use cli::{Cli, Commands, DEFAULT_PARTICIPANT};
pub use repl::{run_repl, RESET_DONE, RESET_NOTHING};

use anyhow::Context;
use conversation::ConversationOrchestrator;

/// Startup round trip to the backend unless `skip` is set. A failure aborts startup.
pub async fn startup_check(
    orchestrator: &ConversationOrchestrator,
    skip: bool,
) -> anyhow::Result<()> {
    if skip {
        tracing::info!("Skipping LLM backend check");
        return Ok(());
    }
    orchestrator
        .check_backend()
        .await
        .context("LLM backend check failed (check API key and base URL, or pass --no-check)")?;
    Ok(())
}
