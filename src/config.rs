/// Client configuration: credentials, endpoint, language and retry policy.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::VkError;

/// Version sent as `v` when neither the config nor the method asks for more.
pub const DEFAULT_API_VERSION: ApiVersion = ApiVersion::new(5, 42);

/// Production API host.
pub const DEFAULT_API_HOST: &str = "https://api.vk.com";

/// A `major.minor` API version, compared numerically (`5.9 < 5.42`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for ApiVersion {
    type Err = VkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VkError::Precondition(format!("invalid API version: {s:?}"));
        let (major, minor) = s.trim().split_once('.').unwrap_or((s.trim(), "0"));
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor).cmp(&(other.major, other.minor))
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Bounded retry for rate-limited calls (errors 6 and 9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Total number of attempts, the first one included. `1` disables retries.
    pub max_attempts: u32,
    /// Pause before each retry. Blocks the calling thread.
    pub delay: Duration,
}

impl RateLimitPolicy {
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Configuration held by a [`VkApi`](crate::VkApi) instance.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_host: String,
    /// OAuth access token. Every call fails with a precondition error while empty.
    pub access_token: String,
    pub api_version: ApiVersion,
    /// Response language (`lang` parameter), e.g. `"ru"` or `"en"`.
    pub lang: Option<String>,
    pub timeout: Duration,
    pub rate_limit: RateLimitPolicy,
}

impl ApiConfig {
    /// Default configuration with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Build a configuration from environment variables.
    ///
    /// Reads:
    /// - `VK_ACCESS_TOKEN` (optional, empty if unset)
    /// - `VK_API_VERSION` (default [`DEFAULT_API_VERSION`])
    /// - `VK_API_HOST` (default [`DEFAULT_API_HOST`])
    /// - `VK_LANG` (optional)
    pub fn from_env() -> Result<Self, VkError> {
        let mut config = Self::default();
        if let Ok(token) = std::env::var("VK_ACCESS_TOKEN") {
            config.access_token = token;
        }
        if let Ok(version) = std::env::var("VK_API_VERSION") {
            config.api_version = version.parse()?;
        }
        if let Ok(host) = std::env::var("VK_API_HOST") {
            config.api_host = host;
        }
        config.lang = std::env::var("VK_LANG").ok().filter(|l| !l.is_empty());
        Ok(config)
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Base URL for method calls, without trailing slash.
    pub fn method_base(&self) -> String {
        format!("{}/method", self.api_host.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.into(),
            access_token: String::new(),
            api_version: DEFAULT_API_VERSION,
            lang: None,
            timeout: Duration::from_secs(30),
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

// Hand-written so the token never ends up in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_host", &self.api_host)
            .field("access_token", &if self.access_token.is_empty() { "" } else { "***" })
            .field("api_version", &self.api_version)
            .field("lang", &self.lang)
            .field("timeout", &self.timeout)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
