//! Error types for the portal.
//!
//! Uses `thiserror` for typed errors per concern: the document store, the
//! user-record service built on it, checkout construction, and calls to the
//! gateway. Authorization failures are not errors here; guards return a
//! redirect decision instead.

use pinnacle_types::UserId;

/// Failures reported by a [`DocumentStore`](crate::store::DocumentStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the operation.
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Errors from user-record operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// No record exists for the user.
    #[error("no user record for {0}")]
    NotFound(UserId),

    /// Scores only go up.
    #[error("score increments must not be negative (got {0})")]
    NegativePoints(i64),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors building a checkout request.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// No payment public key is configured.
    #[error("Payment temporarily unavailable (public key missing)")]
    Unavailable,

    /// The amount cannot be charged.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// Errors calling the gateway.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with an error status.
    #[error("gateway returned {status}: {message}")]
    Gateway {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the body, or the raw body.
        message: String,
    },
}
