//! Line-based codec for tokio.
//!
//! Frames a byte stream into newline-terminated text lines and writes
//! lines back with a `\r\n` terminator. Framing never fails on content:
//! oversized lines are skipped and invalid UTF-8 is decoded lossily, so a
//! single bad line cannot end a `FramedRead` stream.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error;

/// Default maximum line length in bytes, terminator included.
pub const MAX_LINE_LEN: usize = 8191;

/// Line codec for protocol connections.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Skipping the remainder of an oversized line
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with the default [`MAX_LINE_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Cut outgoing data at its first line ending.
    ///
    /// Keeps one write from smuggling a second protocol line onto the wire.
    pub fn sanitize(mut data: String) -> String {
        if let Some(pos) = data.find(&['\r', '\n'][..]) {
            data.truncate(pos);
        }
        data
    }

    fn decode_line(line: &[u8]) -> String {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        match std::str::from_utf8(line) {
            Ok(text) => text.to_owned(),
            Err(e) => {
                warn!(
                    byte_pos = e.valid_up_to(),
                    "Invalid UTF-8 in inbound line, decoding lossily"
                );
                String::from_utf8_lossy(line).into_owned()
            }
        }
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if src.len() > self.max_len {
                    if !self.discarding {
                        warn!(limit = self.max_len, "Inbound line too long, discarding");
                    }
                    self.discarding = true;
                    src.clear();
                    self.next_index = 0;
                } else {
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if self.discarding {
                self.discarding = false;
                continue;
            }

            if line.len() > self.max_len {
                warn!(
                    actual = line.len(),
                    limit = self.max_len,
                    "Inbound line too long, discarding"
                );
                continue;
            }

            return Ok(Some(Self::decode_line(&line)));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        self.next_index = 0;
        if src.is_empty() || self.discarding {
            src.clear();
            self.discarding = false;
            return Ok(None);
        }

        let rest = src.split();
        Ok(Some(Self::decode_line(&rest)))
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> error::Result<()> {
        let line = Self::sanitize(line);
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("PING :test".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_bare_newline() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :a\nPING :b\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :a".to_string()));
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :b".to_string()));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"later\r\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :later".to_string()));
    }

    #[test]
    fn test_decode_too_long_then_recovers() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\nPING :ok\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :ok".to_string()));
    }

    #[test]
    fn test_decode_discards_oversized_partial() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("0123456789abcdef");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());

        buf.extend_from_slice(b"still the same line\nPING :ok\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :ok".to_string()));
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"PRIVMSG #c :caf\xe9\r\n"[..]);

        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(line, "PRIVMSG #c :caf\u{fffd}");
    }

    #[test]
    fn test_decode_eof_flushes_unterminated_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :tail");

        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some("PING :tail".to_string()));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[tokio::test]
    async fn test_framed_read_survives_bad_lines() {
        use futures_util::StreamExt;
        use tokio_util::codec::FramedRead;

        let data: &[u8] = b"PING :a\r\n\xff\xfe\r\n0123456789012345\nPING :b";
        let lines: Vec<String> = FramedRead::new(data, LineCodec::with_max_len(12))
            .map(|line| line.unwrap())
            .collect()
            .await;

        assert_eq!(lines, ["PING :a", "\u{fffd}\u{fffd}", "PING :b"]);
    }

    #[test]
    fn test_encode() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode("PONG :test".to_string(), &mut buf).unwrap();
        assert_eq!(&buf[..], b"PONG :test\r\n");
    }

    #[test]
    fn test_encode_truncates_embedded_newline() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec
            .encode(": PRIVMSG #c :one\r\nQUIT :two".to_string(), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b": PRIVMSG #c :one\r\n");
    }

    #[test]
    fn test_sanitize_clean() {
        assert_eq!(LineCodec::sanitize("PRIVMSG #test :hello".to_string()), "PRIVMSG #test :hello");
        assert_eq!(LineCodec::sanitize("a\nb".to_string()), "a");
    }
}
