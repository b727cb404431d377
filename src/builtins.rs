//! Handlers and commands every bot gets.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use slirc_bot_proto::Message;
use tokio::sync::mpsc;

use crate::command::{Cmd, CommandRouter};
use crate::error::{HandlerError, HandlerResult};
use crate::handler::Handler;
use crate::sink::ResponseSink;

/// Answers server `PING`s so the connection stays up.
pub struct PingHandler;

#[async_trait]
impl Handler for PingHandler {
    fn accepts(&self, msg: &Message) -> bool {
        msg.command() == "PING"
    }

    async fn handle(&self, msg: Arc<Message>, send: mpsc::Sender<Message>) -> HandlerResult {
        send.send(Message::new("PONG", msg.params().iter().cloned()))
            .await?;
        Ok(())
    }
}

/// Lists the router's commands, sorted, with the prefix attached.
pub struct HelpCmd {
    router: Weak<CommandRouter>,
}

impl HelpCmd {
    /// Build a help command listing `router`'s commands.
    ///
    /// Holds the router weakly so registering it on the router itself does
    /// not leak.
    pub fn new(router: &Arc<CommandRouter>) -> Self {
        Self {
            router: Arc::downgrade(router),
        }
    }
}

#[async_trait]
impl Cmd for HelpCmd {
    async fn respond(&self, _body: String, _source: String, sink: ResponseSink) -> HandlerResult {
        let router = self
            .router
            .upgrade()
            .ok_or_else(|| HandlerError::Internal("command router dropped".to_string()))?;

        let mut names: Vec<String> = router.registered_names().into_iter().collect();
        names.sort();
        let listing = names
            .iter()
            .map(|name| format!("{}{}", router.prefix(), name))
            .collect::<Vec<_>>()
            .join(" ");

        sink.write_str(&format!("commands: {listing}")).await?;
        Ok(())
    }
}

/// Register `echo` and `help` on `router`.
pub fn install(router: &Arc<CommandRouter>) {
    router.register_fn("echo", |body: String, _source, sink: ResponseSink| async move {
        if body.is_empty() {
            return Ok(());
        }
        sink.write_str(&body).await.map(drop)
    });
    router.register("help", HelpCmd::new(router));
}
