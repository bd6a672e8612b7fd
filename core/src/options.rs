//! Request options and the request-descriptor builder.
//!
//! # Design
//! Options are open-ended JSON objects so fragments from different layers
//! (per-call options, client defaults, built-in defaults) can be merged with
//! [`deep_defaults`]. Fragments are merged in priority order: the first
//! fragment that supplies a key wins, and the built-in defaults always come
//! last. The merged object is then lowered into an [`HttpRequest`].

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use url::form_urlencoded;

use crate::error::{FetchError, Result};
use crate::http::{HttpMethod, HttpRequest, ResolveOptions};
use crate::merge::deep_defaults;

const METHOD: &str = "method";
const HEADERS: &str = "headers";
const JSON: &str = "json";
const QUERY: &str = "query";
const BODY: &str = "body";
const RESOLVE_WITH_RESPONSE_BODY: &str = "resolveWithResponseBody";

/// Characters `encodeURIComponent` leaves alone, besides alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One fragment of request options.
///
/// Recognized keys are `method`, `headers`, `json`, `query`, `body` and
/// `resolveWithResponseBody`. Anything else is passed through to the
/// transport in [`HttpRequest::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchOptions(Map<String, Value>);

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(self, method: HttpMethod) -> Self {
        self.set(METHOD, method.as_str())
    }

    /// Set a header, replacing any header of the same name in any case.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let headers = self
            .0
            .entry(HEADERS)
            .or_insert_with(|| Value::Object(Map::new()));
        if !headers.is_object() {
            *headers = Value::Object(Map::new());
        }
        if let Value::Object(headers) = headers {
            headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
            headers.insert(name, Value::String(value.into()));
        }
        self
    }

    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |options, (name, value)| options.header(name, value))
    }

    /// Payload to serialize as the JSON request body.
    pub fn json(self, payload: impl Into<Value>) -> Self {
        self.set(JSON, payload)
    }

    pub fn query(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_value(key, Value::String(value.into()))
    }

    /// A query key whose values are joined with `,`.
    pub fn query_values<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(|v| Value::String(v.into())).collect();
        self.query_value(key, Value::Array(values))
    }

    fn query_value(mut self, key: impl Into<String>, value: Value) -> Self {
        let query = self
            .0
            .entry(QUERY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !query.is_object() {
            *query = Value::Object(Map::new());
        }
        if let Value::Object(query) = query {
            query.insert(key.into(), value);
        }
        self
    }

    /// Raw request body, used when no `json` payload is set.
    pub fn body(self, body: impl Into<String>) -> Self {
        self.set(BODY, body.into())
    }

    pub fn resolve_with_response_body(self, enabled: bool) -> Self {
        self.set(RESOLVE_WITH_RESPONSE_BODY, enabled)
    }

    /// Set any key, including passthrough keys for the transport.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for FetchOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for FetchOptions {
    /// Non-object values yield empty options.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

fn builtin_defaults() -> Map<String, Value> {
    let defaults = json!({
        METHOD: "GET",
        HEADERS: {
            "Content-type": "application/json",
        },
    });
    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Merge `fragments` (highest priority first) over the built-in defaults.
pub fn default_fetch_options<'a, I>(fragments: I) -> Map<String, Value>
where
    I: IntoIterator<Item = &'a FetchOptions>,
{
    let builtin = builtin_defaults();
    let mut sources: Vec<&Map<String, Value>> = fragments.into_iter().map(FetchOptions::as_map).collect();
    sources.push(&builtin);

    let mut merged = Map::new();
    deep_defaults(&mut merged, sources);
    merged
}

/// Build the request descriptor for `url` from option fragments.
///
/// Fails with `InvalidRequest` when a `query` option meets a URL that
/// already has a query string, or when `method` or `headers` are malformed.
pub fn build_request<'a, I>(url: &str, fragments: I) -> Result<HttpRequest>
where
    I: IntoIterator<Item = &'a FetchOptions>,
{
    let mut options = default_fetch_options(fragments);
    let mut url = url.to_string();

    let mut body = match options.shift_remove(BODY) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    };
    if let Some(payload) = options.shift_remove(JSON) {
        body = Some(serde_json::to_string(&payload).map_err(FetchError::Serialize)?);
    }

    if let Some(Value::Object(query)) = options.get(QUERY) {
        if url.contains('?') {
            return Err(FetchError::InvalidRequest(
                "cannot combine a query option with a url that already contains '?'; use the query option only"
                    .to_string(),
            ));
        }
        url.push('?');
        url.push_str(&encode_query(query));
        options.shift_remove(QUERY);
    }

    let method = match options.shift_remove(METHOD) {
        Some(Value::String(method)) => method.parse()?,
        Some(other) => {
            return Err(FetchError::InvalidRequest(format!("method must be a string, got {other}")));
        }
        None => HttpMethod::Get,
    };

    // Header names compare without case; the highest-priority spelling wins.
    let headers = match options.shift_remove(HEADERS) {
        Some(Value::Object(headers)) => {
            let mut lowered: Vec<(String, String)> = Vec::with_capacity(headers.len());
            for (name, value) in headers {
                if !lowered.iter().any(|(seen, _)| seen.eq_ignore_ascii_case(&name)) {
                    lowered.push((name, stringify(&value)));
                }
            }
            lowered
        }
        Some(other) => {
            return Err(FetchError::InvalidRequest(format!("headers must be an object, got {other}")));
        }
        None => Vec::new(),
    };

    let resolve = ResolveOptions {
        resolve_with_response_body: options
            .shift_remove(RESOLVE_WITH_RESPONSE_BODY)
            .and_then(|v| v.as_bool())
            .unwrap_or(false),
    };

    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
        resolve,
        extra: options,
    })
}

/// Form-encode a query mapping, keeping key order.
pub fn encode_query(query: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        serializer.append_pair(key, &stringify(value));
    }
    serializer.finish()
}

/// Percent-encode one path segment the way `encodeURIComponent` does.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
