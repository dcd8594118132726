//! URL composition for database and document endpoints.
//!
//! Nothing here validates or escapes its input. The host must carry its scheme
//! and no trailing slash; document IDs are inserted verbatim, so IDs containing
//! `/`, `?` or `#` must be escaped by the caller.
//!
//! # Examples
//!
//! ```
//! use couch_http::protocol::{base_url, document_url, revision_url};
//!
//! let base = base_url("http://localhost", Some(5984), "test");
//! assert_eq!(base, "http://localhost:5984/test");
//!
//! let doc = document_url(&base, "doc1");
//! assert_eq!(doc, "http://localhost:5984/test/doc1");
//!
//! let rev = revision_url(&base, "doc1", Some("1-abc"));
//! assert_eq!(rev, "http://localhost:5984/test/doc1?rev=1-abc");
//! ```

use super::constants::{NULL_REVISION, REV_PARAM};

/// Compose `host[:port]/database`.
///
/// When `port` is `None` the host is used as-is, which is how a URL behind a
/// reverse proxy or with a port already embedded in `host` is expressed.
pub fn base_url(host: &str, port: Option<u16>, database: &str) -> String {
    match port {
        Some(port) => format!("{}:{}/{}", host, port, database),
        None => format!("{}/{}", host, database),
    }
}

/// Compose `{base}/{id}`.
#[inline]
pub fn document_url(base: &str, id: &str) -> String {
    format!("{}/{}", base, id)
}

/// Compose `{base}/{id}?rev={revision}`.
///
/// An unresolved revision is written as the literal `null`.
pub fn revision_url(base: &str, id: &str, revision: Option<&str>) -> String {
    format!(
        "{}?{}={}",
        document_url(base, id),
        REV_PARAM,
        revision.unwrap_or(NULL_REVISION)
    )
}
