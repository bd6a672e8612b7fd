//! Request execution through an injected transport.

use crate::error::Result;
use crate::http::{HttpRequest, Transport};
use crate::options::{build_request, FetchOptions};

/// Send `request` once. Transport failures come back unchanged as
/// `FetchError::Transport`; any HTTP status is returned as a response.
pub async fn execute<T>(transport: &T, request: &HttpRequest) -> Result<T::Response>
where
    T: Transport + ?Sized,
{
    tracing::debug!(method = %request.method, url = %request.url, "sending request");
    Ok(transport.send(request).await?)
}

/// Build a request for `url` from option fragments and send it.
///
/// Fragments are in priority order; the built-in defaults always apply last.
pub async fn fetch_typed<'a, T, I>(transport: &T, url: &str, fragments: I) -> Result<T::Response>
where
    T: Transport + ?Sized,
    I: IntoIterator<Item = &'a FetchOptions>,
{
    let request = build_request(url, fragments)?;
    execute(transport, &request).await
}
