/*!
 * Connection descriptors and driver resolution.
 *
 * A `Connector` names a driver, a base URL and a set of credentials. The
 * database handle appends its own name to the base URL and opens a fresh
 * connection for every operation.
 */

use log::debug;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::DatabaseError;

/// Suffix appended to `base_url + name` to form the connection URL
pub const DATABASE_URL_SUFFIX: &str = ".db";

/// Supported database drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// Embedded SQLite through rusqlite
    Sqlite,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for Driver {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            _ => Err(DatabaseError::Driver(s.to_string())),
        }
    }
}

impl Driver {
    /// Open a new connection to `url`
    pub fn open(&self, url: &str) -> Result<Connection, DatabaseError> {
        match self {
            Driver::Sqlite => {
                let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX;

                Connection::open_with_flags(url, flags).map_err(|source| {
                    DatabaseError::Connection {
                        url: url.to_string(),
                        source,
                    }
                })
            }
        }
    }
}

/// Account used to connect to the database server
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection descriptor: driver name, base URL and credentials
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    driver: String,
    base_url: String,
    user: Credentials,
}

impl Connector {
    pub fn new(driver: impl Into<String>, base_url: impl Into<String>, user: Credentials) -> Self {
        Self {
            driver: driver.into(),
            base_url: base_url.into(),
            user,
        }
    }

    /// SQLite connector storing database files inside `dir`
    pub fn sqlite<P: AsRef<Path>>(dir: P) -> Self {
        let mut base_url = dir.as_ref().to_string_lossy().into_owned();
        if !base_url.ends_with(std::path::MAIN_SEPARATOR) && !base_url.ends_with('/') {
            base_url.push(std::path::MAIN_SEPARATOR);
        }
        Self::new(Driver::Sqlite.to_string(), base_url, Credentials::default())
    }

    pub fn driver_name(&self) -> &str {
        &self.driver
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user(&self) -> &Credentials {
        &self.user
    }

    /// Resolve the configured driver name
    pub fn load_driver(&self) -> Result<Driver, DatabaseError> {
        debug!("Getting driver '{}'", self.driver);
        self.driver.parse()
    }

    /// Connection URL for the database called `name`
    pub fn url_for(&self, name: &str) -> String {
        format!("{}{}{}", self.base_url, name, DATABASE_URL_SUFFIX)
    }
}
