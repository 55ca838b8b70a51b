use crate::libs::config::{Config, DatabaseConfig, ServerConfig};
use crate::server;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Command-line overrides; they win over the environment and the config file.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, mut config: Config) -> Config {
        if self.host.is_some() || self.port.is_some() {
            let current = config.server();
            config.server = Some(ServerConfig {
                host: self.host.unwrap_or(current.host),
                port: self.port.unwrap_or(current.port),
            });
        }
        if let Some(path) = self.database {
            config.database = Some(DatabaseConfig { path });
        }
        config
    }
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    let config = args.apply(Config::read()?.with_env_overrides());
    server::serve(&config).await
}
