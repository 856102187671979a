//! Base-URL-bound fetch client.

use http::Method;

use crate::{FetchError, Request, RequestBuilder, Response, Transport};

/// HTTP client bound to a base URL and a transport.
///
/// Paths passed to [`FetchClient::request`] are appended to the base URL
/// unless they are already absolute.
pub struct FetchClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> FetchClient<T> {
    /// Create a client for a base URL.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// The base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a request for a path relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        RequestBuilder::new(method, url).accept("application/json")
    }

    /// Create a GET request.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a request and reject HTTP errors and `success: false` bodies.
    pub async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        let method = request.method.clone();
        let url = request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let result = self
            .transport
            .send(request)
            .await
            .and_then(Response::error_for_status);

        match &result {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status.as_u16(), "request succeeded")
            }
            Err(e) => tracing::warn!(%method, %url, error = %e, "request failed"),
        }
        result
    }
}
