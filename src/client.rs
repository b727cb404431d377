//! Connection-level dispatch loop.
//!
//! A [`Client`] owns one connection. [`Client::listen`] runs two tasks:
//!
//! - **intake** reads lines, parses them and queues the messages;
//! - **dispatch** offers each queued message to every registered
//!   [`Handler`] in registration order, spawning `handle` for each one that
//!   accepts, and writes everything handlers put on the send queue.
//!
//! Both queues are bounded. A full receive queue stalls intake and a full
//! send queue stalls the replying handler; nothing else throttles work.
//! Handlers are never timed out or cancelled.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use slirc_bot_proto::{LineCodec, Message, ProtocolError};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, info, warn};

use crate::config::DispatchConfig;
use crate::handler::Handler;
use crate::telemetry::spans;

/// One protocol connection plus its handlers.
///
/// Handlers can only be added before [`listen`](Self::listen) consumes the
/// client, so the handler list is never touched while messages fan out.
pub struct Client<R, W> {
    reader: FramedRead<R, LineCodec>,
    writer: FramedWrite<W, LineCodec>,
    handlers: Vec<Arc<dyn Handler>>,
    recv_capacity: usize,
    send_tx: mpsc::Sender<Message>,
    send_rx: mpsc::Receiver<Message>,
}

impl Client<OwnedReadHalf, OwnedWriteHalf> {
    /// Dial `address` over TCP.
    pub async fn connect(address: &str, config: &DispatchConfig) -> std::io::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self::new(read_half, write_half, config))
    }
}

impl<R, W> Client<R, W>
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Unpin,
{
    /// Wrap an already established byte stream.
    pub fn new(reader: R, writer: W, config: &DispatchConfig) -> Self {
        let (send_tx, send_rx) = mpsc::channel(config.send_capacity.max(1));
        Self {
            reader: FramedRead::new(reader, LineCodec::with_max_len(config.max_line_len)),
            writer: FramedWrite::new(writer, LineCodec::with_max_len(config.max_line_len)),
            handlers: Vec::new(),
            recv_capacity: config.recv_capacity.max(1),
            send_tx,
            send_rx,
        }
    }

    /// Add a handler. Handlers see every message in registration order.
    pub fn register(&mut self, handler: Arc<dyn Handler>) -> &mut Self {
        debug!(handler = handler.name(), "Registered handler");
        self.handlers.push(handler);
        self
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// A sender onto the outbound queue, for messages not triggered by a handler.
    pub fn sender(&self) -> mpsc::Sender<Message> {
        self.send_tx.clone()
    }

    /// Send `NICK` and `USER` straight to the connection.
    pub async fn nick(&mut self, nick: &str, user: &str, realname: &str) -> Result<(), ProtocolError> {
        self.writer.send(format!("NICK {nick}")).await?;
        self.writer.send(format!("USER {user} 0 * :{realname}")).await
    }

    /// Send `JOIN` straight to the connection.
    pub async fn join(&mut self, channel: &str) -> Result<(), ProtocolError> {
        self.writer.send(format!("JOIN {channel}")).await
    }

    /// Run intake and dispatch until the inbound stream ends and every
    /// queued reply has been written.
    ///
    /// Once intake stops, no new messages are dispatched, but handlers that
    /// are still running can keep replying. `listen` returns when the send
    /// queue closes, i.e. when those handlers and every [`sender`](Self::sender)
    /// clone have been dropped.
    pub async fn listen(self) {
        let Client {
            reader,
            mut writer,
            handlers,
            recv_capacity,
            send_tx,
            mut send_rx,
        } = self;

        let (recv_tx, mut recv_rx) = mpsc::channel(recv_capacity);
        tokio::spawn(intake(reader, recv_tx).in_current_span());

        // Dropped when intake ends, so the send queue can close.
        let mut send_tx = Some(send_tx);

        loop {
            tokio::select! {
                received = recv_rx.recv(), if send_tx.is_some() => match received {
                    Some(msg) => {
                        if let Some(send) = &send_tx {
                            dispatch(&handlers, msg, send);
                        }
                    }
                    None => {
                        info!("Inbound stream closed, draining outbound queue");
                        send_tx = None;
                    }
                },
                outbound = send_rx.recv() => match outbound {
                    Some(msg) => {
                        let line = msg.to_string();
                        debug!(line = %line, "send");
                        if let Err(e) = writer.send(line).await {
                            warn!(error = %e, "Failed to write outbound message");
                        }
                    }
                    None => break,
                }
            }
        }

        info!("Outbound queue drained, stopping dispatch");
    }
}

/// Read, parse and queue inbound lines until the stream ends.
///
/// A read error is logged and reading resumes. `FramedRead` reports one
/// `None` right after an error; only a `None` that does not follow an error
/// is end of stream.
async fn intake<R>(mut reader: FramedRead<R, LineCodec>, recv: mpsc::Sender<Message>)
where
    R: AsyncRead + Unpin,
{
    let mut errored = false;

    loop {
        let line = match reader.next().await {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                warn!(error = %e, "Failed to read line");
                errored = true;
                continue;
            }
            None if errored => {
                errored = false;
                continue;
            }
            None => break,
        };
        errored = false;

        let msg = match Message::parse(&line) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, "Dropping unparseable line");
                continue;
            }
        };

        debug!(line = %msg.raw(), "recv");
        if recv.send(msg).await.is_err() {
            break;
        }
    }

    debug!("Intake finished");
}

/// Spawn `handle` for every handler that accepts `msg`.
fn dispatch(handlers: &[Arc<dyn Handler>], msg: Message, send: &mpsc::Sender<Message>) {
    let msg = Arc::new(msg);

    for handler in handlers.iter().filter(|h| h.accepts(&msg)) {
        let span = spans::handler(handler.name(), msg.command());
        let handler = Arc::clone(handler);
        let msg = Arc::clone(&msg);
        let send = send.clone();

        tokio::spawn(
            async move {
                if let Err(e) = handler.handle(msg, send).await {
                    warn!(error = %e, code = e.error_code(), "Handler failed");
                }
            }
            .instrument(span),
        );
    }
}
