//! Error types for the fetch client.
//!
//! # Design
//! `FetchError` is the one failure type every client call returns. Its
//! variants separate failures that happen before the request leaves
//! (`MissingId`, `InvalidRequest`, `Serialize`), on the wire (`Transport`),
//! and after a response arrived (`Response`, `Decode`).
//!
//! `ResponseError` is the normalized non-2xx response. Its body is either
//! the parsed error object (when the server sent a recognized error body)
//! or the raw text.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Field name that marks a JSON body as a recognized error body.
pub const ERROR_FIELD: &str = "error";

/// Rendered when a JSON error body carries no usable message.
pub const NO_SERVER_RESPONSE: &str = "no server response";

/// Message prefix for failures whose body is not a recognized error body.
pub const REQUEST_FAILED: &str = "Request failed";

pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport could not complete the exchange (DNS, connect, reset,
    /// body read). Carries the transport's own error unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A by-id call was made without an id. Raised before any I/O.
    #[error("cannot send to {endpoint} without an id")]
    MissingId { endpoint: String },

    /// The options could not be turned into a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The resolved body did not match the expected type.
    #[error("deserialization failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl FetchError {
    pub fn is_response_error(&self) -> bool {
        matches!(self, FetchError::Response(_))
    }

    pub fn as_response_error(&self) -> Option<&ResponseError> {
        match self {
            FetchError::Response(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of a `Response` failure.
    pub fn status(&self) -> Option<u16> {
        self.as_response_error().map(ResponseError::status)
    }
}

/// Free-function form of [`FetchError::is_response_error`].
pub fn is_response_error(err: &FetchError) -> bool {
    err.is_response_error()
}

/// True when `body` is an object with a string `error` field.
pub fn is_error_body(body: &Value) -> bool {
    body.get(ERROR_FIELD).is_some_and(Value::is_string)
}

/// A recognized error body. Fields other than `error` are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body carried by a `ResponseError`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Text(String),
    Json(Value),
}

/// A non-2xx response, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseError {
    message: String,
    status: u16,
    body: ResponseBody,
}

impl ResponseError {
    pub(crate) fn new(message: impl Into<String>, status: u16, body: ResponseBody) -> Self {
        Self {
            message: message.into(),
            status,
            body,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn is_json(&self) -> bool {
        matches!(self.body, ResponseBody::Json(_))
    }

    /// The body as a typed error body, when it is one.
    pub fn error_body(&self) -> Option<ErrorBody> {
        match &self.body {
            ResponseBody::Json(value) => serde_json::from_value(value.clone()).ok(),
            ResponseBody::Text(_) => None,
        }
    }

    /// Human-readable reason: the text body, or the `error` field of a JSON
    /// body.
    pub fn resolve_message(&self) -> &str {
        match &self.body {
            ResponseBody::Text(text) => text,
            ResponseBody::Json(value) => value
                .get(ERROR_FIELD)
                .and_then(Value::as_str)
                .unwrap_or(NO_SERVER_RESPONSE),
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Status: {} - {}",
            self.message,
            self.status,
            self.resolve_message()
        )
    }
}

impl StdError for ResponseError {}

/// A transport-level failure, passed through untouched.
///
/// Display and `source()` are those of the wrapped error.
#[derive(Debug)]
pub struct TransportError(Box<dyn StdError + Send + Sync>);

impl TransportError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(err.into())
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}
