/// Request dispatcher for the VK API.
///
/// [`VkApi`] assembles `https://<host>/method/<name>?<params>&v=..&access_token=..`,
/// sends it through the configured [`Transport`], classifies the envelope and
/// drives the only retry loop in the SDK:
///
/// - captcha required (14): ask the [`CaptchaSolver`] once, re-issue the same
///   request with `captcha_sid`/`captcha_key`; a second captcha is returned.
/// - rate limited (6, 9): sleep [`RateLimitPolicy::delay`] and retry until
///   [`RateLimitPolicy::max_attempts`] is spent.
/// - anything else is returned as is.
///
/// [`RateLimitPolicy::delay`]: crate::config::RateLimitPolicy::delay
/// [`RateLimitPolicy::max_attempts`]: crate::config::RateLimitPolicy::max_attempts
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;
use url::Url;

use crate::account::AccountCategory;
use crate::captcha::CaptchaSolver;
use crate::config::{ApiConfig, ApiVersion};
use crate::envelope::classify;
use crate::errors::{ErrorKind, VkError};
use crate::market::MarketCategory;
use crate::params::VkParameters;
use crate::transport::{HttpTransport, Transport};

/// VK API client. Cheap to clone; clones share the transport and solver.
#[derive(Clone)]
pub struct VkApi {
    config: ApiConfig,
    transport: Arc<dyn Transport>,
    captcha_solver: Option<Arc<dyn CaptchaSolver>>,
}

impl VkApi {
    /// Create a client that talks HTTP through reqwest.
    pub fn new(config: ApiConfig) -> Result<Self, VkError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            captcha_solver: None,
        }
    }

    /// Install the solver consulted on captcha errors. Without one, captcha
    /// errors are returned to the caller.
    pub fn with_captcha_solver(mut self, solver: Arc<dyn CaptchaSolver>) -> Self {
        self.captcha_solver = Some(solver);
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.config.access_token = token.into();
    }

    /// Methods of the `account.*` group.
    pub fn account(&self) -> AccountCategory<'_> {
        AccountCategory::new(self)
    }

    /// Methods of the `market.*` group.
    pub fn market(&self) -> MarketCategory<'_> {
        MarketCategory::new(self)
    }

    /// Call `method` with the configured API version and return the raw
    /// success payload.
    pub fn call(&self, method: &str, params: &VkParameters) -> Result<Value, VkError> {
        self.dispatch(method, params, None)
    }

    /// Call `method`, sending at least `min_version` as `v`.
    pub fn call_versioned(
        &self,
        method: &str,
        params: &VkParameters,
        min_version: ApiVersion,
    ) -> Result<Value, VkError> {
        self.dispatch(method, params, Some(min_version))
    }

    /// The version sent for a method that requires `min_version`.
    pub fn effective_version(&self, min_version: Option<ApiVersion>) -> ApiVersion {
        match min_version {
            Some(min) if min > self.config.api_version => min,
            _ => self.config.api_version,
        }
    }

    /// Build the full request URL. Caller parameters come first, in order,
    /// followed by `v`, `lang` and `access_token`.
    pub fn request_url(
        &self,
        method: &str,
        params: &VkParameters,
        min_version: Option<ApiVersion>,
    ) -> Result<String, VkError> {
        self.check_preconditions(method)?;
        self.build_url(method, params, min_version)
    }

    /// URL assembly for a method name that already passed the preconditions.
    fn build_url(
        &self,
        method: &str,
        params: &VkParameters,
        min_version: Option<ApiVersion>,
    ) -> Result<String, VkError> {
        let mut query = params.clone();
        query
            .add("v", &self.effective_version(min_version).to_string())
            .add("lang", &self.config.lang)
            .add("access_token", &self.config.access_token);
        let url = Url::parse(&format!(
            "{}/{}?{}",
            self.config.method_base(),
            method,
            query.to_query_string()
        ))?;
        Ok(url.into())
    }

    fn check_preconditions(&self, method: &str) -> Result<(), VkError> {
        if self.config.access_token.is_empty() {
            return Err(VkError::Precondition(
                "access token is not set; authorize first".into(),
            ));
        }
        if method.is_empty() {
            return Err(VkError::Precondition("method name is empty".into()));
        }
        if !method
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        {
            return Err(VkError::Precondition(format!(
                "invalid method name: {method:?}"
            )));
        }
        Ok(())
    }

    fn dispatch(
        &self,
        method: &str,
        params: &VkParameters,
        min_version: Option<ApiVersion>,
    ) -> Result<Value, VkError> {
        self.check_preconditions(method)?;

        let policy = self.config.rate_limit;
        let mut request = params.clone();
        let mut attempt: u32 = 1;
        let mut captcha_answered = false;

        loop {
            let url = self.build_url(method, &request, min_version)?;
            debug!(
                "api.call method={} attempt={} params={}",
                method,
                attempt,
                request.len()
            );

            let err = match self.transport.fetch(&url).and_then(|text| classify(&text)) {
                Ok(payload) => {
                    debug!("api.call ok method={}", method);
                    return Ok(payload);
                }
                Err(err) => err,
            };
            debug!(
                "api.call failed method={} kind={:?} code={:?}",
                method,
                err.kind(),
                err.error_code()
            );

            if let Some(challenge) = err.captcha_challenge().cloned() {
                let solver = match &self.captcha_solver {
                    Some(solver) if !captcha_answered => solver,
                    _ => return Err(err),
                };
                warn!(
                    "api.call captcha_needed method={} sid={}",
                    method, challenge.sid
                );
                let key = solver.resolve(&challenge)?;
                if key.is_empty() {
                    return Err(VkError::Precondition(format!(
                        "captcha solver returned an empty key for sid {}",
                        challenge.sid
                    )));
                }
                request
                    .add("captcha_sid", &challenge.sid)
                    .add("captcha_key", &key);
                captcha_answered = true;
                continue;
            }

            if err.kind() == ErrorKind::RateLimited && attempt < policy.max_attempts {
                warn!(
                    "api.call rate_limited method={} attempt={}/{} delay_ms={}",
                    method,
                    attempt,
                    policy.max_attempts,
                    policy.delay.as_millis()
                );
                std::thread::sleep(policy.delay);
                attempt += 1;
                continue;
            }

            return Err(err);
        }
    }
}

impl fmt::Debug for VkApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VkApi")
            .field("config", &self.config)
            .field("captcha_solver", &self.captcha_solver.is_some())
            .finish_non_exhaustive()
    }
}
