//! Configuration for the taskd server.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). A missing file is not an error: every section falls
//! back to its defaults. Environment variables, optionally loaded from a
//! `.env` file, override the file:
//!
//! - `TASKD_HOST`: address to bind
//! - `TASKD_PORT`: port to listen on
//! - `TASKD_DATABASE`: path to the SQLite file
//!
//! ```rust,no_run
//! use taskd::libs::config::Config;
//!
//! let config = Config::read()?.with_env_overrides();
//! println!("{}", config.server().bind_address());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_HOST: &str = "TASKD_HOST";
pub const ENV_PORT: &str = "TASKD_PORT";
pub const ENV_DATABASE: &str = "TASKD_DATABASE";

/// HTTP listener settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Where the SQLite file lives.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    /// `taskd.db` in the platform data directory, or the working directory if
    /// that cannot be created.
    fn default() -> Self {
        let path = DataStorage::new()
            .get_path(DB_FILE_NAME)
            .unwrap_or_else(|_| PathBuf::from(DB_FILE_NAME));
        DatabaseConfig { path }
    }
}

/// Root configuration. Unset sections use their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Reads the config file from the data directory, defaults if missing.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the config file from the data directory, if present.
    pub fn delete() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn database(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }

    /// Applies `TASKD_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup. Unparsable values are
    /// reported and skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.is_empty()) {
            self.server = Some(ServerConfig { host, ..self.server() });
        }

        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.is_empty()) {
            match port.parse() {
                Ok(port) => self.server = Some(ServerConfig { port, ..self.server() }),
                Err(_) => msg_warning!(Message::InvalidEnvValue(ENV_PORT.to_string(), port)),
            }
        }

        if let Some(path) = lookup(ENV_DATABASE).filter(|v| !v.is_empty()) {
            self.database = Some(DatabaseConfig { path: PathBuf::from(path) });
        }

        self
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let sections = [Message::ConfigModuleServer.to_string(), Message::ConfigModuleDatabase.to_string()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&sections)
            .interact()?;

        for &selection in &selected {
            match selection {
                0 => {
                    let default = config.server();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        host: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerHost.to_string())
                            .default(default.host)
                            .interact_text()?,
                        port: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerPort.to_string())
                            .default(default.port)
                            .interact_text()?,
                    });
                }
                1 => {
                    let default = config.database();
                    msg_print!(Message::ConfigModuleDatabase);
                    let path: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDatabasePath.to_string())
                        .default(default.path.display().to_string())
                        .interact_text()?;
                    config.database = Some(DatabaseConfig { path: PathBuf::from(path) });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
