use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::database::schema::quote_identifier;
use crate::database::{Connector, Credentials, Driver, SqlDatabase};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Database and table to work on
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Connection descriptor settings
    #[serde(default)]
    pub connector: ConnectorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Database selection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    // @field: Database name appended to the base URL
    #[serde(default = "default_database_name")]
    pub name: String,

    // @field: Table used when a command does not name one
    #[serde(default = "default_table_name")]
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: default_database_name(),
            table: default_table_name(),
        }
    }
}

/// Connection descriptor configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConnectorConfig {
    // @field: Driver name
    #[serde(default = "default_driver")]
    pub driver: String,

    // @field: Base URL the database name is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    // @field: Account name
    #[serde(default)]
    pub username: String,

    // @field: Account password
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            base_url: default_base_url(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl ConnectorConfig {
    // @returns: Connector built from these settings
    pub fn to_connector(&self) -> Connector {
        Connector::new(
            self.driver.clone(),
            self.base_url.clone(),
            Credentials::new(self.username.clone(), self.password.clone()),
        )
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_database_name() -> String {
    "tweets".to_string()
}

fn default_table_name() -> String {
    "statuses".to_string()
}

fn default_driver() -> String {
    Driver::Sqlite.to_string()
}

/// Default base URL: `<user data dir>/tweetstore/`, or `./` when unknown
pub fn default_base_url() -> String {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .map(|dir| Connector::sqlite(dir.join("tweetstore")).base_url().to_string())
        .unwrap_or_else(|| "./".to_string())
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.database.name.trim().is_empty() {
            return Err(anyhow!("Database name must not be empty"));
        }

        quote_identifier(&self.database.table)
            .map_err(|e| anyhow!("Invalid default table name: {}", e))?;

        self.connector
            .driver
            .parse::<Driver>()
            .map_err(|e| anyhow!("Invalid connector: {}", e))?;

        if self.connector.base_url.is_empty() {
            return Err(anyhow!("Connector base URL must not be empty"));
        }

        Ok(())
    }

    /// Load the configuration at `path`, creating it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    // @returns: Database handle described by this configuration
    pub fn open_database(&self) -> SqlDatabase {
        SqlDatabase::new(self.database.name.clone(), self.connector.to_connector())
    }

    /// Database handle whose parent directory exists on disk.
    ///
    /// SQLite creates the database file but not missing directories. URI
    /// (`file:`) base URLs are passed through untouched.
    pub fn prepare_database(&self) -> Result<SqlDatabase> {
        let db = self.open_database();

        if !db.url().starts_with("file:") {
            if let Some(parent) = Path::new(db.url()).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
            }
        }

        Ok(db)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database: DatabaseConfig::default(),
            connector: ConnectorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
