//! Transport seam between the client and the network.

use std::time::Duration;

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Sends one built request and returns the raw response.
///
/// Futures are not required to be `Send`: the storefront runs on a
/// single-threaded event loop, and the browser fetch API is `!Send`.
#[async_trait(?Send)]
pub trait Transport {
    /// Send the request.
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// Transport backed by `reqwest` (native and wasm32).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool.
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    /// Create a transport reusing an existing client.
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let mut builder = self.client.request(request.method, &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(self.timeout);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_builder() {
        FetchError::InvalidUrl(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}
