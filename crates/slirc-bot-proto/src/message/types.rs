/// A single protocol message.
///
/// Built by [`Message::parse`] on receipt, or by a handler before sending.
/// Equality compares `prefix`, `command` and `params`; the raw line is kept
/// for diagnostics only.
///
/// # Example
///
/// ```
/// use slirc_bot_proto::Message;
///
/// let msg = Message::new("PRIVMSG", ["#rust", "hello"]).with_prefix("bot!bot@host");
/// assert_eq!(msg.to_string(), ":bot!bot@host PRIVMSG #rust :hello");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Message {
    pub(crate) raw: String,
    pub(crate) prefix: String,
    pub(crate) command: String,
    pub(crate) params: Vec<String>,
}

impl Message {
    /// Create a message with an empty prefix.
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            raw: String::new(),
            prefix: String::new(),
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a PRIVMSG to a channel or nick.
    #[must_use]
    pub fn privmsg<T, M>(target: T, text: M) -> Self
    where
        T: Into<String>,
        M: Into<String>,
    {
        Self::new("PRIVMSG", [target.into(), text.into()])
    }

    /// Create a PONG answering the given token.
    #[must_use]
    pub fn pong<T: Into<String>>(token: T) -> Self {
        Self::new("PONG", [token.into()])
    }

    /// Set the sender identity.
    #[must_use]
    pub fn with_prefix<P: Into<String>>(mut self, prefix: P) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The trimmed line this message was parsed from, empty for built messages.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Sender identity, empty when absent.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Command verb or numeric.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Parameters in wire order. Only the last may contain spaces.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Parameter at `index`, if present.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.command == other.command && self.params == other.params
    }
}

impl Eq for Message {}
