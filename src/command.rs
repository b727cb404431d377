//! Prefix-triggered chat command routing.
//!
//! A [`CommandRouter`] is a [`Handler`] that picks up PRIVMSGs whose text
//! starts with its prefix (e.g. `!echo hi there`), looks the command name
//! up in its table, and runs the matching [`Cmd`] in a task of its own.
//! Unknown names are ignored without a reply.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use slirc_bot_proto::Message;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, warn};

use crate::error::HandlerResult;
use crate::handler::Handler;
use crate::sink::ResponseSink;
use crate::telemetry::spans;

/// A chat command.
///
/// `body` is the text after the command name (empty if none), `source` is
/// the sender's nick, and `sink` replies to the channel or nick the command
/// was sent to.
#[async_trait]
pub trait Cmd: Send + Sync + 'static {
    /// Run the command once.
    async fn respond(&self, body: String, source: String, sink: ResponseSink) -> HandlerResult;
}

/// Adapts an async closure into a [`Cmd`] for commands without state.
pub struct CmdFn<F>(F);

impl<F> CmdFn<F> {
    /// Wrap `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> Cmd for CmdFn<F>
where
    F: Fn(String, String, ResponseSink) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    async fn respond(&self, body: String, source: String, sink: ResponseSink) -> HandlerResult {
        (self.0)(body, source, sink).await
    }
}

/// Routes prefixed chat lines to registered commands.
pub struct CommandRouter {
    prefix: String,
    cmds: Mutex<HashMap<String, Arc<dyn Cmd>>>,
}

impl CommandRouter {
    /// Create an empty router for commands starting with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            cmds: Mutex::new(HashMap::new()),
        }
    }

    /// Prefix that marks a chat line as a command.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register `cmd` under `name`, replacing any earlier registration.
    pub fn register<C: Cmd>(&self, name: impl Into<String>, cmd: C) {
        self.cmds.lock().insert(name.into(), Arc::new(cmd));
    }

    /// Register an async closure under `name`.
    pub fn register_fn<F, Fut>(&self, name: impl Into<String>, f: F)
    where
        F: Fn(String, String, ResponseSink) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(name, CmdFn::new(f));
    }

    /// Snapshot of the registered command names.
    pub fn registered_names(&self) -> HashSet<String> {
        self.cmds.lock().keys().cloned().collect()
    }

    fn lookup(&self, name: &str) -> Option<Arc<dyn Cmd>> {
        self.cmds.lock().get(name).cloned()
    }

    /// Split chat text into the command name (prefix removed) and its body.
    fn split_invocation<'a>(&self, text: &'a str) -> (&'a str, &'a str) {
        let (token, body) = text.split_once(' ').unwrap_or((text, ""));
        let name = token.strip_prefix(self.prefix.as_str()).unwrap_or(token);
        (name, body)
    }
}

#[async_trait]
impl Handler for CommandRouter {
    fn accepts(&self, msg: &Message) -> bool {
        msg.command() == "PRIVMSG"
            && msg.params().len() == 2
            && msg.params()[1].starts_with(self.prefix.as_str())
    }

    async fn handle(&self, msg: Arc<Message>, send: mpsc::Sender<Message>) -> HandlerResult {
        let (receiver, text) = msg.extract_privmsg()?;
        let (name, body) = self.split_invocation(text);
        let source = msg.extract_nick()?;

        let Some(cmd) = self.lookup(name) else {
            debug!(name = %name, source = %source, "No command registered");
            return Ok(());
        };

        let span = spans::command(name, source, receiver);
        let name = name.to_owned();
        let body = body.to_owned();
        let source = source.to_owned();
        let sink = ResponseSink::new(send, receiver);

        tokio::spawn(
            async move {
                if let Err(e) = cmd.respond(body, source, sink).await {
                    warn!(command = %name, error = %e, code = e.error_code(), "Command failed");
                }
            }
            .instrument(span),
        );

        Ok(())
    }
}
