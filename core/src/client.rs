//! Verb-oriented HTTP client bound to a base URL.
//!
//! # Design
//! `Client` holds a `base_url`, default options and a transport, and carries
//! no mutable state between calls. Every verb is the same pipeline: merge
//! options into a request, execute it once, resolve the response. Per-call
//! options beat the client's default options, which beat the built-in
//! defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{FetchError, Result};
use crate::fetch::execute;
use crate::http::{HttpMethod, Transport};
use crate::options::{build_request, encode_path_segment, FetchOptions};
use crate::resolve::resolve_response;

/// HTTP client for one API.
///
/// ```no_run
/// # async fn demo() -> typed_fetch::Result<()> {
/// use typed_fetch::{Client, FetchOptions, ReqwestTransport};
///
/// #[derive(serde::Deserialize)]
/// struct User { name: String }
///
/// let client = Client::new("http://localhost:3000", ReqwestTransport::new());
/// let users: Option<Vec<User>> = client.get_many("/api/v1/users", FetchOptions::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T> {
    base_url: String,
    default_options: FetchOptions,
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Bind `base_url` (trailing `/` removed). Endpoints are appended to it
    /// verbatim, so an empty base URL makes endpoints absolute URLs.
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_options: FetchOptions::default(),
            transport,
        }
    }

    pub fn from_config(config: ClientConfig, transport: T) -> Self {
        Self::new(&config.base_url, transport).with_default_options(config.default_options)
    }

    /// Options applied to every call, below the per-call options.
    pub fn with_default_options(mut self, options: FetchOptions) -> Self {
        self.default_options = options;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_options(&self) -> &FetchOptions {
        &self.default_options
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the unresolved response.
    pub async fn fetch(&self, endpoint: &str, options: FetchOptions) -> Result<T::Response> {
        let request = build_request(&self.url(endpoint), [&options, &self.default_options])?;
        execute(&self.transport, &request).await
    }

    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str, options: FetchOptions) -> Result<Option<R>> {
        self.request(self.url(endpoint), options).await
    }

    pub async fn get_one<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        id: Option<&str>,
        options: FetchOptions,
    ) -> Result<Option<R>> {
        let url = self.url_with_id(endpoint, id)?;
        self.request(url, options).await
    }

    pub async fn get_many<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: FetchOptions,
    ) -> Result<Option<Vec<R>>> {
        self.request(self.url(endpoint), options).await
    }

    pub async fn post<B, R>(&self, endpoint: &str, data: Option<&B>, options: FetchOptions) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.url(endpoint), HttpMethod::Post, data, options).await
    }

    pub async fn post_one<B, R>(
        &self,
        endpoint: &str,
        id: Option<&str>,
        data: Option<&B>,
        options: FetchOptions,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url_with_id(endpoint, id)?;
        self.send(url, HttpMethod::Post, data, options).await
    }

    pub async fn put<B, R>(&self, endpoint: &str, data: Option<&B>, options: FetchOptions) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.url(endpoint), HttpMethod::Put, data, options).await
    }

    pub async fn put_one<B, R>(
        &self,
        endpoint: &str,
        id: Option<&str>,
        data: Option<&B>,
        options: FetchOptions,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url_with_id(endpoint, id)?;
        self.send(url, HttpMethod::Put, data, options).await
    }

    pub async fn patch<B, R>(&self, endpoint: &str, data: Option<&B>, options: FetchOptions) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.url(endpoint), HttpMethod::Patch, data, options).await
    }

    pub async fn patch_one<B, R>(
        &self,
        endpoint: &str,
        id: Option<&str>,
        data: Option<&B>,
        options: FetchOptions,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url_with_id(endpoint, id)?;
        self.send(url, HttpMethod::Patch, data, options).await
    }

    pub async fn delete<B, R>(&self, endpoint: &str, data: Option<&B>, options: FetchOptions) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(self.url(endpoint), HttpMethod::Delete, data, options).await
    }

    pub async fn delete_one<B, R>(
        &self,
        endpoint: &str,
        id: Option<&str>,
        data: Option<&B>,
        options: FetchOptions,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url_with_id(endpoint, id)?;
        self.send(url, HttpMethod::Delete, data, options).await
    }

    async fn send<B, R>(
        &self,
        url: String,
        method: HttpMethod,
        data: Option<&B>,
        options: FetchOptions,
    ) -> Result<Option<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut options = options.method(method);
        if let Some(data) = data {
            let payload = serde_json::to_value(data).map_err(FetchError::Serialize)?;
            options = options.json(payload);
        }
        self.request(url, options).await
    }

    async fn request<R: DeserializeOwned>(&self, url: String, options: FetchOptions) -> Result<Option<R>> {
        let request = build_request(&url, [&options, &self.default_options])?;
        let response = execute(&self.transport, &request).await?;
        resolve_response(response, request.resolve).await?.into_typed()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    fn url_with_id(&self, endpoint: &str, id: Option<&str>) -> Result<String> {
        let id = id.ok_or_else(|| FetchError::MissingId {
            endpoint: endpoint.to_string(),
        })?;
        Ok(format!("{}/{}", self.url(endpoint), encode_path_segment(id)))
    }
}
