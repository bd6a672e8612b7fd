//! Response resolution: one body read, then success or a `ResponseError`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{is_error_body, FetchError, ResponseBody, ResponseError, Result, ERROR_FIELD, REQUEST_FAILED};
use crate::http::{ResolveOptions, ResponseHandle};

/// What a response resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The raw body, when `resolve_with_response_body` was requested.
    Text(String),
    /// A parsed, non-null JSON body.
    Json(Value),
    /// No body, or a body that is not JSON.
    Empty,
}

impl Resolved {
    /// Deserialize into `T`. `Text` deserializes from a JSON string, so
    /// `T = String` receives the raw body.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let value = match self {
            Resolved::Empty => return Ok(None),
            Resolved::Json(value) => value,
            Resolved::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map(Some).map_err(FetchError::Decode)
    }
}

/// Read `response` once and normalize it.
///
/// Success bodies that fail to parse as JSON resolve to `Resolved::Empty`.
/// Non-2xx responses become `FetchError::Response`: with the parsed object
/// as body when it carries a string `error` field, with the raw text
/// otherwise.
pub async fn resolve_response<R: ResponseHandle>(response: R, options: ResolveOptions) -> Result<Resolved> {
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await?;
    tracing::trace!(status, ok, len = text.len(), "resolving response");

    if options.resolve_with_response_body {
        return Ok(Resolved::Text(text));
    }

    let body = if text.is_empty() {
        None
    } else {
        serde_json::from_str::<Value>(&text).ok().filter(|v| !v.is_null())
    };

    if ok {
        return Ok(body.map_or(Resolved::Empty, Resolved::Json));
    }

    match body {
        Some(body) if is_error_body(&body) => {
            let message = body
                .get(ERROR_FIELD)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Err(ResponseError::new(message, status, ResponseBody::Json(body)).into())
        }
        _ => {
            let message = if text.is_empty() {
                REQUEST_FAILED.to_string()
            } else {
                format!("{REQUEST_FAILED} - {text}")
            };
            Err(ResponseError::new(message, status, ResponseBody::Text(text)).into())
        }
    }
}
