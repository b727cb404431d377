//! Error types for the protocol library.
//!
//! Parse failures, field extraction failures and stream-level failures
//! are kept apart so callers can log them with the right context.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a message line.
    #[error("invalid message: {string:?}")]
    InvalidMessage {
        /// The offending line.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

impl ProtocolError {
    /// Returns the parse cause when this is a message parse failure.
    pub fn parse_cause(&self) -> Option<&MessageParseError> {
        match self {
            ProtocolError::InvalidMessage { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Reasons a line could not be turned into a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty or whitespace only.
    #[error("empty message")]
    EmptyMessage,

    /// No command token followed the prefix.
    #[error("missing command")]
    MissingCommand,
}

/// Failures pulling chat fields out of a parsed message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// Not a PRIVMSG, or not exactly two parameters.
    #[error("malformed PRIVMSG: command {command:?} with {params} parameters")]
    MalformedPrivmsg {
        /// Command of the rejected message.
        command: String,
        /// Parameter count of the rejected message.
        params: usize,
    },

    /// The prefix has no `!` separating the nick from user and host.
    #[error("unable to extract nick from prefix {0:?}")]
    NoNickInPrefix(String),
}
