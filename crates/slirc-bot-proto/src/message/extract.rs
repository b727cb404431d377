//! Chat field extraction.

use crate::error::ExtractError;

use super::types::Message;

impl Message {
    /// Split a PRIVMSG into `(receiver, body)`.
    ///
    /// Only a PRIVMSG with exactly two parameters qualifies.
    pub fn extract_privmsg(&self) -> Result<(&str, &str), ExtractError> {
        match self.params.as_slice() {
            [receiver, body] if self.command == "PRIVMSG" => Ok((receiver.as_str(), body.as_str())),
            _ => Err(ExtractError::MalformedPrivmsg {
                command: self.command.clone(),
                params: self.params.len(),
            }),
        }
    }

    /// Nick portion of a `nick!user@host` prefix.
    pub fn extract_nick(&self) -> Result<&str, ExtractError> {
        match self.prefix.split_once('!') {
            Some((nick, _)) => Ok(nick),
            None => Err(ExtractError::NoNickInPrefix(self.prefix.clone())),
        }
    }
}
