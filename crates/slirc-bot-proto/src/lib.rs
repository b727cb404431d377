//! # slirc-bot-proto
//!
//! Wire codec for the slirc-bot framework: turns protocol lines into
//! [`Message`] values and back, extracts chat fields from them, and frames
//! a byte stream into lines for tokio.
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_bot_proto::Message;
//!
//! let msg = Message::parse(":nick!user@host PRIVMSG #chan :hello there").unwrap();
//! assert_eq!(msg.prefix(), "nick!user@host");
//! assert_eq!(msg.command(), "PRIVMSG");
//! assert_eq!(msg.params(), ["#chan", "hello there"]);
//!
//! let reply = Message::privmsg("#chan", "hi");
//! assert_eq!(reply.to_string(), ": PRIVMSG #chan :hi");
//! ```
//!
//! Formatting always emits the prefix marker and always marks the last
//! parameter as trailing. Parsing drops an empty trailing parameter. Both
//! are relied on by peers and are kept as is.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;

pub use self::error::{ExtractError, MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::Message;
