//! CLI parser.

use clap::{Parser, Subcommand};

/// Participant id used when `--participant` is not given.
pub const DEFAULT_PARTICIPANT: &str = "local";

#[derive(Parser, Debug)]
#[command(name = "dbot")]
#[command(about = "Chat with an LLM backend from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Skip the startup round trip that verifies the API key and endpoint.
    #[arg(long, global = true)]
    pub no_check: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Interactive chat: /start greets, /reset clears history, /quit exits.
    Chat {
        #[arg(short, long, default_value = DEFAULT_PARTICIPANT)]
        participant: String,
    },
    /// Send one message and print the reply.
    Ask {
        #[arg(short, long, default_value = DEFAULT_PARTICIPANT)]
        participant: String,
        text: String,
    },
}
