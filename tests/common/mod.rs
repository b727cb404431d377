//! Shared integration test utilities.
//!
//! Wires a [`Client`] to an in-memory duplex stream and gives the test the
//! other end as a [`TestPeer`] that plays the server.

#![allow(dead_code)]

use std::time::Duration;

use slirc_bot::Client;
use slirc_bot::config::DispatchConfig;
use slirc_bot_proto::Message;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};
use tokio::time::timeout;

pub type TestClient = Client<ReadHalf<DuplexStream>, WriteHalf<DuplexStream>>;

/// The server side of a test connection.
pub struct TestPeer {
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
}

/// Create a client and the peer it talks to.
pub fn connect(config: &DispatchConfig) -> (TestClient, TestPeer) {
    let (client_io, peer_io) = tokio::io::duplex(64 * 1024);

    let (read_half, write_half) = tokio::io::split(client_io);
    let client = Client::new(read_half, write_half, config);

    let (peer_read, peer_write) = tokio::io::split(peer_io);
    let peer = TestPeer {
        reader: BufReader::new(peer_read),
        writer: peer_write,
    };

    (client, peer)
}

impl TestPeer {
    /// Send a raw line, adding the terminator if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one raw line, terminator stripped.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        self.recv_line_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_line_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive and parse one message.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        let line = self.recv_line().await?;
        Message::parse(&line).map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive `count` messages, in arrival order.
    pub async fn recv_many(&mut self, count: usize) -> anyhow::Result<Vec<Message>> {
        let mut messages = Vec::with_capacity(count);
        for _ in 0..count {
            messages.push(self.recv().await?);
        }
        Ok(messages)
    }

    /// Close our write side; the client's intake sees end of stream.
    pub async fn close(&mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
