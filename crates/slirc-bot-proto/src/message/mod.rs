//! Protocol message type, parsing, formatting and field extraction.

mod extract;
mod parse;
mod serialize;
mod types;

pub use self::types::Message;
