//! Telemetry utilities: subscriber setup and standard spans.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Standardized span constructors for dispatch observability.
pub mod spans {
    use tracing::{Span, info_span};

    /// Create a span for one connection.
    pub fn connection(peer: &str) -> Span {
        info_span!("connection", peer = %peer)
    }

    /// Create a span for one handler invocation.
    pub fn handler(handler: &str, command: &str) -> Span {
        info_span!("handler", handler = %handler, command = %command)
    }

    /// Create a span for a chat command execution.
    pub fn command(name: &str, source: &str, target: &str) -> Span {
        info_span!("command", name = %name, source = %source, target = %target)
    }
}
