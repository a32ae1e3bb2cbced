//! Remote retrieval of the page archive and index
//!
//! [`Fetch`] is the seam between the cache and the transport. The default
//! implementation is a blocking `reqwest` client; tests substitute an
//! in-memory source.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, TldrError};

/// Retrieve the full body of a remote resource
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP transport
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// You can pass a custom `reqwest` client to configure proxies, timeouts, etc.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn try_default() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TldrError::Transport {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self::new(client))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let transport = |message: String| TldrError::Transport {
            url: url.to_string(),
            message,
        };

        debug!(url, "downloading");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport(format!("server responded with {}", status)));
        }

        let body = response.bytes().map_err(|e| transport(e.to_string()))?;
        debug!(url, bytes = body.len(), "downloaded");
        Ok(body.to_vec())
    }
}
