//! Message parsing.

use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};

use super::types::Message;

/// Marker that opens the prefix at line start.
const PREFIX_MARKER: char = ':';

/// Separator that opens the trailing parameter.
const TRAILING_MARKER: &str = " :";

fn invalid(raw: &str, cause: MessageParseError) -> ProtocolError {
    ProtocolError::InvalidMessage {
        string: raw.to_owned(),
        cause,
    }
}

impl Message {
    /// Parse one protocol line.
    ///
    /// Surrounding whitespace (including the line terminator) is trimmed
    /// first. Everything after the first `" :"` is the trailing parameter,
    /// spaces included; an empty trailing parameter is dropped rather than
    /// kept as an empty string. Middle parameters are split on single
    /// spaces, so doubled spaces yield empty parameters.
    ///
    /// # Errors
    ///
    /// [`MessageParseError::EmptyMessage`] for blank input and
    /// [`MessageParseError::MissingCommand`] when no command follows the
    /// prefix, both wrapped in [`ProtocolError::InvalidMessage`].
    pub fn parse(raw: &str) -> Result<Message, ProtocolError> {
        let line = raw.trim();
        if line.is_empty() {
            return Err(invalid(raw, MessageParseError::EmptyMessage));
        }

        let (prefix, rest) = match line.strip_prefix(PREFIX_MARKER) {
            Some(stripped) => match stripped.split_once(' ') {
                Some(parts) => parts,
                None => return Err(invalid(raw, MessageParseError::MissingCommand)),
            },
            None => ("", line),
        };

        let (middle, trailing) = match rest.split_once(TRAILING_MARKER) {
            Some((middle, trailing)) => (middle, Some(trailing)),
            None => (rest, None),
        };

        let mut tokens = middle.split(' ');
        let command = tokens.next().unwrap_or_default();
        if command.is_empty() {
            return Err(invalid(raw, MessageParseError::MissingCommand));
        }

        let mut params: Vec<String> = tokens.map(str::to_owned).collect();
        if let Some(trailing) = trailing.filter(|t| !t.is_empty()) {
            params.push(trailing.to_owned());
        }

        Ok(Message {
            raw: line.to_owned(),
            prefix: prefix.to_owned(),
            command: command.to_owned(),
            params,
        })
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        Message::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause(raw: &str) -> MessageParseError {
        Message::parse(raw)
            .unwrap_err()
            .parse_cause()
            .cloned()
            .expect("parse error")
    }

    #[test]
    fn test_parse_privmsg() {
        let msg: Message = ":nick!user@host PRIVMSG #chan :hello there".parse().unwrap();
        assert_eq!(msg.prefix(), "nick!user@host");
        assert_eq!(msg.command(), "PRIVMSG");
        assert_eq!(msg.params(), ["#chan", "hello there"]);
    }

    #[test]
    fn test_parse_without_prefix() {
        let msg = Message::parse("PING :server1").unwrap();
        assert_eq!(msg.prefix(), "");
        assert_eq!(msg.command(), "PING");
        assert_eq!(msg.params(), ["server1"]);
    }

    #[test]
    fn test_parse_empty_message() {
        assert_eq!(cause(""), MessageParseError::EmptyMessage);
        assert_eq!(cause("   "), MessageParseError::EmptyMessage);
        assert_eq!(cause("\r\n"), MessageParseError::EmptyMessage);
    }

    #[test]
    fn test_parse_missing_command() {
        assert_eq!(cause(":irc.example.net"), MessageParseError::MissingCommand);
        assert_eq!(cause(":p  :text"), MessageParseError::MissingCommand);
    }

    #[test]
    fn test_parse_strips_line_terminator() {
        let msg = Message::parse(":server 001 bot :Welcome to the network\r\n").unwrap();
        assert_eq!(msg.raw(), ":server 001 bot :Welcome to the network");
        assert_eq!(msg.command(), "001");
        assert_eq!(msg.params(), ["bot", "Welcome to the network"]);
    }

    #[test]
    fn test_parse_middle_params_only() {
        let msg = Message::parse("MODE #chan +o nick").unwrap();
        assert_eq!(msg.command(), "MODE");
        assert_eq!(msg.params(), ["#chan", "+o", "nick"]);
    }

    #[test]
    fn test_parse_drops_empty_trailing() {
        let msg = Message::parse(":nick!u@h PRIVMSG #chan :").unwrap();
        assert_eq!(msg.params(), ["#chan"]);

        let msg = Message::parse(": QUIT :").unwrap();
        assert_eq!(msg.prefix(), "");
        assert!(msg.params().is_empty());
    }

    #[test]
    fn test_parse_trailing_keeps_later_markers() {
        let msg = Message::parse("PRIVMSG #chan :a :b  c").unwrap();
        assert_eq!(msg.params(), ["#chan", "a :b  c"]);
    }

    #[test]
    fn test_parse_doubled_space_yields_empty_param() {
        let msg = Message::parse("CMD a  b").unwrap();
        assert_eq!(msg.params(), ["a", "", "b"]);
    }

    #[test]
    fn test_parse_does_not_validate_command() {
        let msg = Message::parse("whatever-THIS-is x").unwrap();
        assert_eq!(msg.command(), "whatever-THIS-is");
        assert_eq!(msg.params(), ["x"]);
    }
}
