//! Typed HTTP client with layered request options.
//!
//! # Overview
//! A `Client` binds a base URL, default options and a transport, and exposes
//! verb functions (`get`, `get_one`, `get_many`, `post`, `post_one`, `put`,
//! `put_one`, `patch`, `patch_one`, `delete`, `delete_one`). Each call merges
//! its options over the defaults, sends the request once, reads the body
//! once, and returns the decoded body or a `FetchError`.
//!
//! # Design
//! - Options are JSON objects merged with `merge::deep_defaults`; earlier
//!   fragments win and the built-in defaults come last.
//! - The network sits behind the `Transport` trait so tests inject an
//!   in-memory transport; `ReqwestTransport` is the production one.
//! - Non-2xx responses become `ResponseError`, with the server's error
//!   object when it sent one (`{"error": "..."}`), the raw text otherwise.
//! - Transport failures are passed through unchanged; nothing is retried.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod merge;
pub mod options;
pub mod resolve;
pub mod transport;
pub mod types;

pub use client::Client;
pub use config::{ClientConfig, ConfigError};
pub use error::{
    is_error_body, is_response_error, ErrorBody, FetchError, ResponseBody, ResponseError, Result, TransportError,
};
pub use fetch::{execute, fetch_typed};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResolveOptions, ResponseHandle, Transport};
pub use merge::{deep_defaults, shallow_defaults};
pub use options::{build_request, default_fetch_options, FetchOptions};
pub use resolve::{resolve_response, Resolved};
pub use transport::{ReqwestTransport, ReqwestResponse};
pub use types::{AffectedBody, IdBody, WithId};
