#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # couch_http: CouchDB documents over HTTP
//!
//! A small client for the CouchDB HTTP API. It bootstraps a database when it is
//! missing and creates, reads, updates and deletes JSON documents, handling the
//! `_rev` token that CouchDB requires for optimistic concurrency.
//!
//! ## Overview
//!
//! | Operation | Requests | Success |
//! |-----------|----------|---------|
//! | `create_database()` | `GET {base}`, then `PUT {base}` if missing | existed, or PUT `< 300` |
//! | `create(id, doc)` | `PUT {base}/{id}` | `< 300` |
//! | `update(id, doc, rev)` | `GET {base}/{id}` if `rev` is `None`, `PUT {base}/{id}?rev=` | `< 300` |
//! | `read(id)` | `GET {base}/{id}` | 2xx, otherwise empty map |
//! | `delete(id, rev)` | `GET {base}/{id}` if `rev` is `None`, `DELETE {base}/{id}?rev=` | 2xx |
//!
//! `{base}` is `host[:port]/database`.
//!
//! ## Transport
//!
//! The client never builds its own HTTP stack. It is handed a [`Transport`];
//! [`ReqwestTransport`] is the default implementation, and tests substitute
//! their own.
//!
//! ## Client Usage
//!
//! ```ignore
//! use couch_http::{ClientConfig, ConnectionConfig, CouchClient, ReqwestTransport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::with_config(ClientConfig::default())?;
//!     let client = CouchClient::new(
//!         ConnectionConfig::new("admin", "secret", "test", "http://localhost"),
//!         transport,
//!     );
//!
//!     client.create_database().await?;
//!     client.create("doc1", r#"{"a":1}"#).await?;
//!
//!     let doc = client.read("doc1").await?;
//!     println!("rev = {}", doc["_rev"]);
//!
//!     client.update("doc1", r#"{"a":2}"#, None).await?;
//!     client.delete("doc1", None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - `CouchClient`, connection state, configuration, reqwest transport
//! - **[types]** - Requests, responses and outcome classification
//! - **[protocol]** - Wire constants and URL composition
//! - **[error]** - Error types and result handling

pub mod client;
pub mod error;
pub mod protocol;
pub mod types;
mod traits;

pub use client::{ClientConfig, Connection, ConnectionConfig, CouchClient, ReqwestTransport};
pub use error::{Result, StoreError};
pub use traits::Transport;
pub use types::{BasicAuth, Method, Outcome, StoreRequest, StoreResponse};

#[cfg(test)]
mod tests;
