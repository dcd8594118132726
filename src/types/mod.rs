//! Request, response and outcome types exchanged with the transport.
//!
//! # Type Flow
//!
//! ```text
//! CouchClient ──StoreRequest──▶ Transport ──StoreResponse──▶ Outcome / bool
//! ```
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StoreRequest`] | Method, URL, optional JSON body, optional basic auth |
//! | [`BasicAuth`] | Credentials attached to every request |
//! | [`StoreResponse`] | Status code and raw body, with `ok()` and `json()` helpers |
//! | [`Outcome`] | Tagged classification of a response status |
//!
//! # Examples
//!
//! ```
//! use couch_http::{Method, StoreRequest};
//!
//! let request = StoreRequest::put("http://localhost:5984/test/doc1")
//!     .with_basic_auth("admin", "secret")
//!     .with_body(r#"{"a":1}"#, "application/json");
//!
//! assert_eq!(request.method, Method::Put);
//! assert_eq!(request.body.as_deref(), Some(r#"{"a":1}"#));
//! ```

mod outcome;
mod request;
mod response;

pub use outcome::{is_ok_status, is_write_success, Outcome};
pub use request::{BasicAuth, Method, StoreRequest};
pub use response::StoreResponse;
