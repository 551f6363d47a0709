//! Error types for the gateway.
//!
//! [`GatewayError`] is what handlers return; its
//! [`IntoResponse`](axum::response::IntoResponse) implementation maps each
//! variant to a status code and a fixed `{"error": ...}` body. Upstream
//! detail is logged where it happens and never reaches the client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pinnacle_types::ErrorBody;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request had no usable prompt.
    #[error("Missing prompt")]
    MissingPrompt,

    /// The provider call failed. Detail has already been logged.
    #[error("AI Request Failed")]
    Provider,

    /// The request body could not be read, e.g. it exceeds the size limit.
    #[error("{}", .0.body_text())]
    Body(JsonRejection),
}

impl GatewayError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingPrompt => StatusCode::BAD_REQUEST,
            Self::Provider => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        (status, axum::Json(ErrorBody { error })).into_response()
    }
}

/// Errors raised while calling a provider API.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request could not be sent or the connection failed.
    #[error("{provider} request failed: {source}")]
    Request {
        /// Provider name, for logs.
        provider: &'static str,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{provider} returned {status}: {body}")]
    Status {
        /// Provider name, for logs.
        provider: &'static str,
        /// HTTP status returned.
        status: reqwest::StatusCode,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("{provider} response parse failed: {source}")]
    Decode {
        /// Provider name, for logs.
        provider: &'static str,
        /// Underlying decode error.
        source: reqwest::Error,
    },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable was not set.
    #[error("missing required env var {0}")]
    Missing(String),

    /// A variable was set to a value that could not be parsed.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}
