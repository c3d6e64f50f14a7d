//! # dbot-core
//!
//! Pieces every dbot crate shares: the transport boundary trait [`ConversationHandler`],
//! configuration errors and env helpers, and tracing initialization.

pub mod env;
pub mod error;
pub mod logger;
pub mod types;

pub use error::{ConfigError, Result};
pub use logger::init_tracing;
pub use types::ConversationHandler;
