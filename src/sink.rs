//! Write-only reply channel handed to chat commands.

use slirc_bot_proto::Message;
use tokio::sync::mpsc;

use crate::error::HandlerResult;

/// Sends command output back to where the command came from.
///
/// Each write becomes exactly one PRIVMSG to the bound receiver. Nothing is
/// batched, escaped or split, so multi-line output needs one write per line.
#[derive(Clone, Debug)]
pub struct ResponseSink {
    send: mpsc::Sender<Message>,
    receiver: String,
}

impl ResponseSink {
    /// Bind a sink that queues replies to `receiver` on `send`.
    pub fn new(send: mpsc::Sender<Message>, receiver: impl Into<String>) -> Self {
        Self {
            send,
            receiver: receiver.into(),
        }
    }

    /// Queue `buf` as one message body, returning the full length on success.
    ///
    /// Waits while the send queue is full. Bytes that are not UTF-8 are
    /// replaced before sending.
    pub async fn write(&self, buf: &[u8]) -> HandlerResult<usize> {
        let body = String::from_utf8_lossy(buf).into_owned();
        self.send
            .send(Message::privmsg(self.receiver.clone(), body))
            .await?;
        Ok(buf.len())
    }

    /// Queue `text` as one message body.
    pub async fn write_str(&self, text: &str) -> HandlerResult<usize> {
        self.write(text.as_bytes()).await
    }
}
