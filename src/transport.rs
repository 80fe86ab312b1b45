/// HTTP transport for the VK API.
///
/// The dispatcher only needs `fetch(url) -> body`, so the seam is a small
/// trait. [`HttpTransport`] is the blocking reqwest implementation; tests and
/// callers with their own HTTP stack provide their own.
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::errors::VkError;

/// Fetches a fully formed request URL and returns the raw response body.
///
/// Shared across concurrent calls, hence `Send + Sync`.
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, VkError>;
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, VkError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String, VkError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        let text = response.text()?;
        debug!(
            "transport.fetch status={} body_len={}",
            status,
            text.len()
        );
        if !status.is_success() {
            let snippet: String = text.chars().take(500).collect();
            return Err(VkError::Transport(format!("HTTP {}: {}", status, snippet)));
        }
        Ok(text)
    }
}
