//! `Transport` over `reqwest`.

use async_trait::async_trait;
use reqwest::Method;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, ResponseHandle, Transport};

/// Sends requests with a `reqwest::Client`.
///
/// Timeouts, proxies and TLS settings are whatever the wrapped client was
/// built with. Passthrough options in `HttpRequest::extra` are ignored.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    type Response = ReqwestResponse;

    async fn send(&self, request: &HttpRequest) -> Result<ReqwestResponse, TransportError> {
        let mut builder = self.client.request(method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        let response = builder.send().await?;
        Ok(ReqwestResponse(response))
    }
}

/// A live `reqwest` response; the body is streamed on `text`.
#[derive(Debug)]
pub struct ReqwestResponse(reqwest::Response);

impl ReqwestResponse {
    pub fn headers(&self) -> &reqwest::header::HeaderMap {
        self.0.headers()
    }
}

#[async_trait]
impl ResponseHandle for ReqwestResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    fn ok(&self) -> bool {
        self.0.status().is_success()
    }

    async fn text(self) -> Result<String, TransportError> {
        Ok(self.0.text().await?)
    }
}
