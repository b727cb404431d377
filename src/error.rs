//! Error handling for handlers and commands.
//!
//! None of these errors travel back over the wire: whoever ran the failing
//! handler or command logs the error and carries on.

use slirc_bot_proto::{ExtractError, Message};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can end a single handler or command invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The send queue is closed.
    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    /// The message lacked the fields the handler needs.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Anything else that went wrong inside a handler or command.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Send(_) => "send_error",
            Self::Extract(ExtractError::MalformedPrivmsg { .. }) => "malformed_privmsg",
            Self::Extract(ExtractError::NoNickInPrefix(_)) => "no_nick_in_prefix",
            Self::Extract(_) => "extract_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

/// Result type for handlers and commands.
pub type HandlerResult<T = ()> = Result<T, HandlerError>;
