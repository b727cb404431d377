//! slircbot - Straylight IRC bot
//!
//! Connects, identifies, joins the configured channels and answers chat
//! commands until the server closes the connection.

use std::sync::Arc;

use slirc_bot::builtins::{self, PingHandler};
use slirc_bot::config::Config;
use slirc_bot::telemetry::{self, spans};
use slirc_bot::{Client, CommandRouter};
use tracing::{Instrument, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        server = %config.server.address,
        nick = %config.identity.nick,
        prefix = %config.commands.prefix,
        "Starting slircbot"
    );

    let router = Arc::new(CommandRouter::new(config.commands.prefix.as_str()));
    builtins::install(&router);

    let span = spans::connection(&config.server.address);
    async {
        let mut client = Client::connect(&config.server.address, &config.dispatch).await?;
        client.register(Arc::new(PingHandler));
        client.register(router);

        let identity = &config.identity;
        client
            .nick(&identity.nick, identity.user(), &identity.realname)
            .await?;
        for channel in &identity.channels {
            client.join(channel).await?;
        }

        info!("Connected, listening");
        client.listen().await;
        info!("Connection closed");
        anyhow::Ok(())
    }
    .instrument(span)
    .await
}
