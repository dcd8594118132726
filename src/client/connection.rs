//! Connection state: coordinates, credentials and the derived base URL.

use crate::client::config::ConnectionConfig;
use crate::protocol;
use crate::types::BasicAuth;

/// Resolved connection to one database.
///
/// The base URL is derived from host, port and database, and is recomputed by
/// [`Connection::set_database`], the only way to change the database.
///
/// # Examples
///
/// ```
/// use couch_http::client::{Connection, ConnectionConfig};
///
/// let mut connection = Connection::new(
///     ConnectionConfig::new("admin", "secret", "test", "http://localhost"),
/// );
/// assert_eq!(connection.base_url(), "http://localhost:5984/test");
///
/// connection.set_database("archive");
/// assert_eq!(connection.base_url(), "http://localhost:5984/archive");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    host: String,
    port: Option<u16>,
    database: String,
    auth: BasicAuth,
    base_url: String,
}

impl Connection {
    /// Resolve a connection from its configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        let ConnectionConfig {
            host,
            port,
            database,
            user,
            password,
        } = config;

        let base_url = protocol::base_url(&host, port, &database);
        Self {
            host,
            port,
            database,
            auth: BasicAuth::new(user, password),
            base_url,
        }
    }

    /// Switch to another database and recompute the base URL.
    pub fn set_database(&mut self, database: impl Into<String>) {
        self.database = database.into();
        self.base_url = protocol::base_url(&self.host, self.port, &self.database);
    }

    /// `host[:port]/database`
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current database name.
    #[inline]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Configured host.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Configured port.
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Credentials sent with every request.
    #[inline]
    pub fn auth(&self) -> &BasicAuth {
        &self.auth
    }
}
