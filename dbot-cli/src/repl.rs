//! Line-oriented chat loop over any async reader/writer.

use conversation::ConversationOrchestrator;
use dbot_core::ConversationHandler;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

const PROMPT: &str = "> ";
pub const RESET_DONE: &str = "History cleared.";
pub const RESET_NOTHING: &str = "No history to clear.";

/// Reads lines until EOF or `/quit`. Blank lines are skipped.
pub async fn run_repl<R, W>(
    orchestrator: &ConversationOrchestrator,
    participant_id: &str,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let reply = match line.trim() {
            "" => continue,
            "/quit" => break,
            "/start" => orchestrator.on_start_command(participant_id).await,
            "/reset" => {
                if orchestrator.reset(participant_id).await {
                    RESET_DONE.to_string()
                } else {
                    RESET_NOTHING.to_string()
                }
            }
            text => orchestrator.on_text_message(participant_id, text).await,
        };
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    info!(participant_id = %participant_id, "Chat ended");
    Ok(())
}
