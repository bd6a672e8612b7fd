//! HTTP transport types and the transport seam.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe requests and responses as plain
//! data. The network itself sits behind the `Transport` trait, which the
//! caller injects into the client; tests hand in an in-memory transport and
//! production code hands in [`crate::transport::ReqwestTransport`].
//!
//! A response body may be read once. `ResponseHandle::text` takes the handle
//! by value, so a second read does not compile.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{FetchError, TransportError};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(FetchError::InvalidRequest(format!("unsupported HTTP method: {s}"))),
        }
    }
}

/// Options consumed by the response resolver rather than the transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Return the body text verbatim, without JSON parsing or status checks.
    pub resolve_with_response_body: bool,
}

/// A finalized request descriptor.
///
/// Built by [`crate::options::build_request`] and handed to a `Transport`.
/// `extra` carries every option key the builder does not recognize, for
/// transports that understand them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub resolve: ResolveOptions,
    pub extra: Map<String, Value>,
}

impl HttpRequest {
    /// First header value whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// The in-memory `ResponseHandle`: transports that buffer the whole body
/// (and tests) return this.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A response whose body can be read exactly once.
#[async_trait]
pub trait ResponseHandle: Send {
    fn status(&self) -> u16;

    /// Whether the status is in the 2xx range.
    fn ok(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Consume the handle and read the whole body as text.
    async fn text(self) -> Result<String, TransportError>;
}

#[async_trait]
impl ResponseHandle for HttpResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn text(self) -> Result<String, TransportError> {
        Ok(self.body)
    }
}

/// The capability to put a request on the wire.
///
/// Network-level failures come back as `TransportError`; any HTTP status,
/// including 4xx and 5xx, is a successful send.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: ResponseHandle;

    async fn send(&self, request: &HttpRequest) -> Result<Self::Response, TransportError>;
}

#[async_trait]
impl<T: Transport> Transport for Arc<T> {
    type Response = T::Response;

    async fn send(&self, request: &HttpRequest) -> Result<Self::Response, TransportError> {
        (**self).send(request).await
    }
}
