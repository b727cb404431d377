//! Configuration loading and management.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use slirc_bot_proto::MAX_LINE_LEN;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for [`Config`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Where to connect.
    pub server: ServerConfig,
    /// Who to be once connected.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Chat command routing.
    #[serde(default)]
    pub commands: CommandsConfig,
    /// Queue sizes and framing limits.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// `host:port` to dial (e.g., "irc.libera.chat:6667").
    pub address: String,
}

/// Identity sent right after connecting.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Nickname (default: "slircbot").
    #[serde(default = "default_nick")]
    pub nick: String,
    /// Username (ident). Defaults to the nick.
    #[serde(default)]
    pub user: Option<String>,
    /// Real name sent with `USER`.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Channels to join on startup.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl IdentityConfig {
    /// Username to register with.
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(&self.nick)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            nick: default_nick(),
            user: None,
            realname: default_realname(),
            channels: Vec::new(),
        }
    }
}

fn default_nick() -> String {
    "slircbot".to_string()
}

fn default_realname() -> String {
    "slirc-bot".to_string()
}

/// Chat command configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Prefix that marks a chat line as a command (default: "!").
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> String {
    "!".to_string()
}

/// Dispatch loop configuration.
///
/// The queues are the only backpressure: a full receive queue stalls the
/// reader, a full send queue stalls whichever handler is replying.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Inbound message queue capacity (default: 5).
    #[serde(default = "default_queue_capacity")]
    pub recv_capacity: usize,
    /// Outbound message queue capacity (default: 5).
    #[serde(default = "default_queue_capacity")]
    pub send_capacity: usize,
    /// Longest accepted inbound line in bytes (default: 8191).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            recv_capacity: default_queue_capacity(),
            send_capacity: default_queue_capacity(),
            max_line_len: default_max_line_len(),
        }
    }
}

fn default_queue_capacity() -> usize {
    5
}

fn default_max_line_len() -> usize {
    MAX_LINE_LEN
}
