//! IRC Channel Logger
//!
//! Connects to one server over TLS, joins one channel and appends every
//! public message to a plain-text log as `"<nick>: <message>"`. Dropped
//! connections are retried with exponential backoff. Shares nothing with
//! the statistics pipeline.

pub mod bot;
pub mod chat_log;
pub mod config;
pub mod error;
pub mod message;
pub mod tls;

pub use bot::LoggerBot;
pub use config::{Backoff, IrcConfig};
pub use error::IrcError;
