//! Configuration for the document store client and its HTTP transport.
//!
//! # Connection Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `host` | `http://localhost` | Scheme-qualified host, no trailing slash |
//! | `port` | `Some(5984)` | `None` leaves the port out of the URL |
//! | `database` | `""` | Database addressed by document operations |
//! | `user` / `password` | `""` | Basic auth credentials |
//!
//! # Transport Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `request_timeout_ms` | 30000 | Whole-request timeout |
//! | `connect_timeout_ms` | 10000 | TCP/TLS connect timeout |
//! | `max_idle_per_host` | 32 | Idle connections kept by reqwest |
//! | `proxy_url` | `""` | Route all traffic through this proxy when set |
//! | `user_agent` | `couch_http/<version>` | `User-Agent` header |
//!
//! # Examples
//!
//! ```
//! use couch_http::client::{ClientConfig, ConnectionConfig};
//!
//! let connection = ConnectionConfig::new("admin", "secret", "orders", "https://couch.internal")
//!     .with_port(None);
//! assert_eq!(connection.port, None);
//!
//! let transport = ClientConfig::default().with_request_timeout_ms(5_000);
//! assert_eq!(transport.request_timeout_ms, 5_000);
//! assert_eq!(transport.connect_timeout_ms, 10_000);
//! ```

use crate::protocol::constants::DEFAULT_PORT;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_host() -> String {
    "http://localhost".to_string()
}

fn default_port() -> Option<u16> {
    Some(DEFAULT_PORT)
}

/// Coordinates and credentials of a CouchDB database.
///
/// `Debug` output never includes the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Scheme-qualified host without trailing slash, e.g. `https://couch.example.com`
    #[serde(default = "default_host")]
    pub host: String,

    /// Port appended to the host, or `None` to use the host as-is
    #[serde(default = "default_port")]
    pub port: Option<u16>,

    /// Database name
    #[serde(default)]
    pub database: String,

    /// Basic auth user
    #[serde(default)]
    pub user: String,

    /// Basic auth password
    #[serde(default)]
    pub password: String,
}

impl ConnectionConfig {
    /// Create a configuration on the default port.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Override the port. `None` leaves the port out of the URL.
    #[must_use]
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new("", "", "", default_host())
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for [`ReqwestTransport`](crate::client::ReqwestTransport).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Whole-request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Maximum idle connections kept per host.
    pub max_idle_per_host: usize,

    /// Proxy URL (optional).
    ///
    /// If set, requests will be routed through this proxy.
    pub proxy_url: String,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            max_idle_per_host: 32,
            proxy_url: String::new(),
            user_agent: concat!("couch_http/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whole-request timeout.
    #[must_use]
    pub fn with_request_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn with_connect_timeout_ms(mut self, ms: u64) -> Self {
        self.connect_timeout_ms = ms;
        self
    }

    /// Set the idle connection limit per host.
    #[must_use]
    pub fn with_max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    /// Route requests through a proxy.
    #[must_use]
    pub fn with_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = url.into();
        self
    }

    /// Set the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}
