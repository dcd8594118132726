//! Classification of store responses.
//!
//! Two success thresholds exist and are kept apart:
//!
//! | Check | Success when | Used by |
//! |-------|--------------|---------|
//! | [`is_ok_status`] | `200..=299` | existence checks, reads, revision lookup, delete |
//! | [`is_write_success`] | `< 300` | database creation, document create and update |
//!
//! Failures map to the same variants under either threshold.
//!
//! # Examples
//!
//! ```
//! use couch_http::Outcome;
//!
//! assert_eq!(Outcome::from_write_status(201), Outcome::Success);
//! assert_eq!(Outcome::from_write_status(409), Outcome::Conflict);
//! assert_eq!(Outcome::from_ok_status(404), Outcome::NotFound);
//! assert_eq!(Outcome::from_ok_status(503), Outcome::ServerError(503));
//!
//! // 1xx passes the write threshold but is not an ok status
//! assert!(Outcome::from_write_status(102).is_success());
//! assert!(!Outcome::from_ok_status(102).is_success());
//! ```

/// Whether `status` is in the 2xx range.
#[inline]
#[must_use]
pub fn is_ok_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Whether `status` counts as a successful write.
#[inline]
#[must_use]
pub fn is_write_success(status: u16) -> bool {
    status < 300
}

/// What a store response means for the caller.
///
/// Transport failures never reach this type; they travel as
/// [`StoreError`](crate::StoreError) instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The request succeeded under the threshold that applies to it.
    Success,
    /// 404: no such database or document.
    NotFound,
    /// 409: the document exists, or the supplied revision is stale.
    Conflict,
    /// Any other status below 500 that is not a success.
    Rejected(u16),
    /// 5xx.
    ServerError(u16),
}

impl Outcome {
    /// Classify a read-style response (success only for 2xx).
    #[must_use]
    pub fn from_ok_status(status: u16) -> Self {
        if is_ok_status(status) {
            Outcome::Success
        } else {
            Self::failure(status)
        }
    }

    /// Classify a write response (success for anything below 300).
    #[must_use]
    pub fn from_write_status(status: u16) -> Self {
        if is_write_success(status) {
            Outcome::Success
        } else {
            Self::failure(status)
        }
    }

    fn failure(status: u16) -> Self {
        match status {
            404 => Outcome::NotFound,
            409 => Outcome::Conflict,
            500.. => Outcome::ServerError(status),
            _ => Outcome::Rejected(status),
        }
    }

    /// `true` only for [`Outcome::Success`].
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}
