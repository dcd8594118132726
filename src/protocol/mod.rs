//! CouchDB wire protocol constants and URL composition.
//!
//! # Endpoints
//!
//! | Request | Purpose |
//! |---------|---------|
//! | `GET {base}` | Database existence check |
//! | `PUT {base}` | Create database |
//! | `PUT {base}/{id}` | Create document |
//! | `PUT {base}/{id}?rev={rev}` | Replace document |
//! | `GET {base}/{id}` | Fetch document |
//! | `DELETE {base}/{id}?rev={rev}` | Delete document |
//!
//! `{base}` is `host[:port]/database`.

mod urls;

pub use urls::{base_url, document_url, revision_url};

/// Protocol constants.
pub mod constants {
    /// CouchDB's default listening port.
    pub const DEFAULT_PORT: u16 = 5984;

    /// Document field holding the revision token.
    pub const REV_FIELD: &str = "_rev";

    /// Query parameter carrying the revision on writes and deletes.
    pub const REV_PARAM: &str = "rev";

    /// Written in place of a revision that could not be resolved.
    pub const NULL_REVISION: &str = "null";

    /// Content type of every request body.
    pub const JSON_CONTENT_TYPE: &str = "application/json";
}
