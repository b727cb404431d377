use std::fmt::{self, Display, Formatter};

use super::types::Message;

impl Display for Message {
    /// Formats as `:<prefix> <command> <middle>... :<last>`.
    ///
    /// The last parameter is always written as trailing, and a message
    /// without parameters ends in a bare `:`. No line terminator is added.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, ":{} {} ", self.prefix, self.command)?;

        match self.params.split_last() {
            Some((last, middle)) => {
                for param in middle {
                    write!(f, "{} ", param)?;
                }
                write!(f, ":{}", last)
            }
            None => write!(f, ":"),
        }
    }
}
