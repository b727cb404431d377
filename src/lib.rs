//! slirc-bot - Straylight IRC bot framework
//!
//! Reads protocol lines from one connection, fans each message out to every
//! [`Handler`] that accepts it, and serializes their replies back onto the
//! wire. [`CommandRouter`] is the stock handler for `!name body` style chat
//! commands.
//!
//! ```no_run
//! use std::sync::Arc;
//! use slirc_bot::{Client, CommandRouter, config::DispatchConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let router = Arc::new(CommandRouter::new("!"));
//! router.register_fn("hello", |_body, source, sink| async move {
//!     sink.write_str(&format!("hello, {source}")).await.map(drop)
//! });
//!
//! let mut client = Client::connect("irc.example.net:6667", &DispatchConfig::default()).await?;
//! client.register(router);
//! client.nick("slircbot", "slircbot", "slirc-bot").await?;
//! client.join("#bots").await?;
//! client.listen().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod builtins;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod handler;
pub mod sink;
pub mod telemetry;

pub use client::Client;
pub use command::{Cmd, CmdFn, CommandRouter};
pub use error::{HandlerError, HandlerResult};
pub use handler::Handler;
pub use sink::ResponseSink;
pub use slirc_bot_proto::Message;
