//! Scripted transport shared by the integration tests.
//!
//! Behaves like a strict mock: every request must match the next scripted
//! URL (when one is given), and an unscripted request fails the test.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use vk_sdk::{ApiConfig, RateLimitPolicy, Transport, VkApi, VkError};

pub const TOKEN: &str = "token";

enum Reply {
    Body(String),
    Fail(String),
}

#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<(Option<String>, Reply)>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Expect exactly `url` and answer with `body`.
    pub fn expect(self: &Arc<Self>, url: &str, body: &str) -> Arc<Self> {
        self.push(Some(url.to_string()), Reply::Body(body.to_string()))
    }

    /// Answer the next request with `body`, whatever its URL.
    pub fn reply(self: &Arc<Self>, body: &str) -> Arc<Self> {
        self.push(None, Reply::Body(body.to_string()))
    }

    /// Fail the next request at the transport level.
    pub fn fail(self: &Arc<Self>, message: &str) -> Arc<Self> {
        self.push(None, Reply::Fail(message.to_string()))
    }

    fn push(self: &Arc<Self>, url: Option<String>, reply: Reply) -> Arc<Self> {
        self.script.lock().unwrap().push_back((url, reply));
        Arc::clone(self)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// True when every scripted reply was consumed.
    pub fn is_exhausted(&self) -> bool {
        self.script.lock().unwrap().is_empty()
    }
}

impl Transport for MockTransport {
    fn fetch(&self, url: &str) -> Result<String, VkError> {
        self.requests.lock().unwrap().push(url.to_string());
        let (expected, reply) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {url}"));
        if let Some(expected) = expected {
            assert_eq!(url, expected, "request URL mismatch");
        }
        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Fail(message) => Err(VkError::Transport(message)),
        }
    }
}

/// Default config with the test token and no rate-limit delay.
pub fn config() -> ApiConfig {
    ApiConfig::new(TOKEN).with_rate_limit(RateLimitPolicy {
        max_attempts: 3,
        delay: std::time::Duration::ZERO,
    })
}

pub fn api(transport: &Arc<MockTransport>) -> VkApi {
    VkApi::with_transport(config(), transport.clone())
}

pub fn api_without_token(transport: &Arc<MockTransport>) -> VkApi {
    VkApi::with_transport(config().with_access_token(""), transport.clone())
}
