//! CouchDB document client.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── store      - CouchClient and the document operations
//! ├── connection - Host, port, database and the derived base URL
//! ├── config     - Connection and transport configuration
//! └── http       - reqwest-backed Transport
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CouchClient`] | Database bootstrap and document CRUD |
//! | [`Connection`] | Connection coordinates and base URL |
//! | [`ConnectionConfig`] | Where and as whom to connect |
//! | [`ClientConfig`] | Timeouts, pool and proxy for the HTTP transport |
//! | [`ReqwestTransport`] | Default [`Transport`](crate::Transport) implementation |
//!
//! # Examples
//!
//! ```
//! use couch_http::client::{ClientConfig, ConnectionConfig, CouchClient, ReqwestTransport};
//!
//! let transport = ReqwestTransport::with_config(ClientConfig::default()).unwrap();
//! let mut client = CouchClient::new(
//!     ConnectionConfig::new("admin", "secret", "test", "http://localhost"),
//!     transport,
//! );
//! assert_eq!(client.base_url(), "http://localhost:5984/test");
//!
//! client.set_database("archive");
//! assert_eq!(client.base_url(), "http://localhost:5984/archive");
//! ```

mod config;
mod connection;
mod http;
mod store;

pub use config::{ClientConfig, ConnectionConfig};
pub use connection::Connection;
pub use http::ReqwestTransport;
pub use store::CouchClient;
