//! Response returned by a transport.
//!
//! # Examples
//!
//! ```
//! use couch_http::StoreResponse;
//!
//! let response = StoreResponse::new(200, r#"{"_id":"doc1","_rev":"1-abc","a":1}"#);
//! assert!(response.ok());
//! assert_eq!(response.revision().as_deref(), Some("1-abc"));
//!
//! let json = response.json().unwrap();
//! assert_eq!(json["a"], 1);
//! ```

use crate::error::{Result, StoreError};
use crate::protocol::constants::REV_FIELD;
use crate::types::outcome::is_ok_status;
use serde_json::Value;
use std::collections::BTreeMap;

/// Status code and raw body of a store response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreResponse {
    /// HTTP status code
    pub status: u16,

    /// Raw response body
    pub body: String,
}

impl StoreResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[inline]
    #[must_use]
    pub fn ok(&self) -> bool {
        is_ok_status(self.status)
    }

    /// HTTP status code.
    #[inline]
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw response body.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the body as a JSON object, keys in sorted order.
    ///
    /// # Errors
    ///
    /// [`StoreError::Json`] when the body is not JSON, and
    /// [`StoreError::UnexpectedBody`] when it is JSON but not an object.
    pub fn json(&self) -> Result<BTreeMap<String, Value>> {
        match serde_json::from_str::<Value>(&self.body)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Err(StoreError::UnexpectedBody(self.body.clone())),
        }
    }

    /// The `_rev` string of a JSON object body, if there is one.
    pub fn revision(&self) -> Option<String> {
        self.json()
            .ok()?
            .get(REV_FIELD)?
            .as_str()
            .map(str::to_owned)
    }
}
