//! Revision-aware CouchDB document client.
//!
//! # Examples
//!
//! ## Bootstrap and write
//!
//! ```ignore
//! use couch_http::{ConnectionConfig, CouchClient, ReqwestTransport, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ReqwestTransport::with_config(ClientConfig::default())?;
//!     let config = ConnectionConfig::new("admin", "secret", "test", "http://localhost");
//!     let client = CouchClient::new(config, transport);
//!
//!     assert!(client.create_database().await?);
//!     assert!(client.create("doc1", r#"{"a":1}"#).await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Update without knowing the revision
//!
//! ```ignore
//! // One GET to look up `_rev`, then the PUT.
//! let updated = client.update("doc1", r#"{"a":2}"#, None).await?;
//!
//! // Explicit revision: only the PUT is sent.
//! let updated = client.update("doc1", r#"{"a":3}"#, Some("2-def")).await?;
//! ```

use crate::client::config::ConnectionConfig;
use crate::client::connection::Connection;
use crate::error::Result;
use crate::protocol::{self, constants::JSON_CONTENT_TYPE};
use crate::traits::Transport;
use crate::types::{Method, Outcome, StoreRequest, StoreResponse};
use serde_json::Value;
use std::collections::BTreeMap;

/// Client for one CouchDB database.
///
/// Every operation sends one or two requests in sequence through the injected
/// [`Transport`] and caches nothing between calls. Store-level failures come back
/// as `false` (or an empty map from [`read`](Self::read)); only transport
/// failures are `Err`.
///
/// Revision lookup and the write that follows are separate requests. Another
/// writer can get in between, in which case the store rejects the write and
/// the operation returns `false`.
pub struct CouchClient<T> {
    connection: Connection,
    transport: T,
}

impl<T: Transport> CouchClient<T> {
    /// Create a client for the database described by `config`.
    pub fn new(config: ConnectionConfig, transport: T) -> Self {
        Self {
            connection: Connection::new(config),
            transport,
        }
    }

    /// Point the client at another database on the same server.
    pub fn set_database(&mut self, database: impl Into<String>) {
        self.connection.set_database(database);
    }

    /// `host[:port]/database`
    #[inline]
    pub fn base_url(&self) -> &str {
        self.connection.base_url()
    }

    /// Current database name.
    #[inline]
    pub fn database(&self) -> &str {
        self.connection.database()
    }

    /// Resolved connection state.
    #[inline]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The injected transport.
    #[inline]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create the database unless it already exists.
    ///
    /// Sends `GET {base}`; when that is not ok, sends `PUT {base}`. Another
    /// process may create the database between the two requests, and the store's
    /// answer to the PUT is then taken as-is.
    ///
    /// Returns `true` if the database existed or the PUT status is below 300.
    pub async fn create_database(&self) -> Result<bool> {
        Ok(self.bootstrap_database().await?.is_success())
    }

    async fn bootstrap_database(&self) -> Result<Outcome> {
        let existing = self.send(self.request(Method::Get, self.base_url())).await?;
        if existing.ok() {
            tracing::debug!(database = %self.database(), "database already exists");
            return Ok(Outcome::Success);
        }

        let created = self.send(self.request(Method::Put, self.base_url())).await?;
        let outcome = Outcome::from_write_status(created.status());
        tracing::debug!(database = %self.database(), status = created.status(), ?outcome, "database creation");
        Ok(outcome)
    }

    /// Store a new document under `id`.
    ///
    /// `document` must already be JSON text and `id` is used verbatim as a
    /// path segment. No revision is sent, so an existing document makes the
    /// store reject the write and this returns `false`.
    pub async fn create(&self, id: &str, document: &str) -> Result<bool> {
        let url = protocol::document_url(self.base_url(), id);
        let request = self
            .request(Method::Put, url)
            .with_body(document, JSON_CONTENT_TYPE);

        let response = self.send(request).await?;
        Ok(Outcome::from_write_status(response.status()).is_success())
    }

    /// Replace document `id` with `document`.
    ///
    /// With `revision` set, a single `PUT {base}/{id}?rev={revision}` is sent.
    /// Without it, the current `_rev` is fetched first; if that lookup fails the
    /// PUT carries `rev=null` and the store decides.
    ///
    /// A rejected write is logged at error level with the response body.
    pub async fn update(&self, id: &str, document: &str, revision: Option<&str>) -> Result<bool> {
        let revision = match revision {
            Some(revision) => Some(revision.to_owned()),
            None => self.current_revision(id).await?,
        };

        let url = protocol::revision_url(self.base_url(), id, revision.as_deref());
        let request = self
            .request(Method::Put, url)
            .with_body(document, JSON_CONTENT_TYPE);

        let response = self.send(request).await?;
        let outcome = Outcome::from_write_status(response.status());
        if !outcome.is_success() {
            tracing::error!(
                id,
                status = response.status(),
                ?outcome,
                "document update failed: {}",
                response.body()
            );
        }
        Ok(outcome.is_success())
    }

    /// Fetch document `id`.
    ///
    /// Returns the document (including `_id` and `_rev`) with keys in sorted
    /// order, or an empty map for any non-ok status. A missing document and a
    /// refused request look the same.
    ///
    /// # Errors
    ///
    /// Besides transport failures, an ok response whose body is not a JSON
    /// object is an error.
    pub async fn read(&self, id: &str) -> Result<BTreeMap<String, Value>> {
        let url = protocol::document_url(self.base_url(), id);
        let response = self.send(self.request(Method::Get, url)).await?;
        if response.ok() {
            response.json()
        } else {
            Ok(BTreeMap::new())
        }
    }

    /// Delete document `id`.
    ///
    /// Revision handling is the same as [`update`](Self::update): an unresolved
    /// revision is sent as `rev=null`. Returns `true` only for a 2xx response.
    pub async fn delete(&self, id: &str, revision: Option<&str>) -> Result<bool> {
        let revision = match revision {
            Some(revision) => Some(revision.to_owned()),
            None => self.current_revision(id).await?,
        };

        let url = protocol::revision_url(self.base_url(), id, revision.as_deref());
        let response = self.send(self.request(Method::Delete, url)).await?;
        Ok(Outcome::from_ok_status(response.status()).is_success())
    }

    /// Look up the current `_rev` of `id`. `None` when the GET is not ok or the
    /// body has no string `_rev`.
    async fn current_revision(&self, id: &str) -> Result<Option<String>> {
        let url = protocol::document_url(self.base_url(), id);
        let response = self.send(self.request(Method::Get, url)).await?;
        if !response.ok() {
            tracing::debug!(id, status = response.status(), "revision lookup failed");
            return Ok(None);
        }
        Ok(response.revision())
    }

    fn request(&self, method: Method, url: impl Into<String>) -> StoreRequest {
        StoreRequest::new(method, url).with_auth(self.connection.auth().clone())
    }

    async fn send(&self, request: StoreRequest) -> Result<StoreResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "couch request");
        self.transport.send(request).await
    }
}
