//! The `Handler` trait implemented by everything the dispatch loop fans out to.

use std::sync::Arc;

use async_trait::async_trait;
use slirc_bot_proto::Message;
use tokio::sync::mpsc;

use crate::error::HandlerResult;

/// Reacts to inbound messages it accepts.
///
/// `accepts` runs on the dispatch task and must be cheap. `handle` runs in
/// its own task for every accepted message and may take as long as it
/// likes; replies go out through `send`.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    /// Whether this handler wants `msg`.
    fn accepts(&self, msg: &Message) -> bool;

    /// Process an accepted message, queueing any replies on `send`.
    async fn handle(&self, msg: Arc<Message>, send: mpsc::Sender<Message>) -> HandlerResult;

    /// Name used in logs and spans.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
