/// Error types for the VK SDK.
///
/// Maps the numeric `error_code` of a VK error envelope to typed Rust errors
/// through an explicit lookup table, and adds the local failure kinds
/// (precondition, transport, malformed response, projection).
use std::fmt;

use thiserror::Error;

use crate::captcha::CaptchaChallenge;

/// Coarse failure category, independent of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller input: missing token, empty method name, empty required argument.
    Precondition,
    /// Connectivity, timeout or non-success HTTP status.
    Transport,
    /// The body was not a valid VK envelope.
    MalformedResponse,
    Authorization,
    PermissionDenied,
    CaptchaRequired,
    RateLimited,
    InvalidParameter,
    /// A well-formed error envelope whose code is not in the lookup table.
    Unclassified,
    /// The success payload did not have the shape the caller asked for.
    Projection,
}

/// The remote side of a failed call, exactly as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub code: i64,
    pub message: String,
    /// `request_params` echoed back by the server, in server order.
    pub request_params: Vec<(String, String)>,
}

impl RemoteError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            request_params: Vec::new(),
        }
    }

    /// Look up an echoed request parameter by key.
    pub fn request_param(&self, key: &str) -> Option<&str> {
        self.request_params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The primary error type for the VK SDK.
#[derive(Error, Debug)]
pub enum VkError {
    // Local
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // Remote
    #[error("User authorization failed (5): {0}")]
    UserAuthorizationFailed(RemoteError),

    #[error("Access denied ({}): {}", .0.code, .0.message)]
    AccessDenied(RemoteError),

    /// `challenge` is `None` when the envelope carried no `captcha_sid`; such
    /// an error cannot be answered and is never retried.
    #[error("Captcha needed (14): {error}, sid: {}", captcha_sid(.challenge))]
    CaptchaNeeded {
        error: RemoteError,
        challenge: Option<CaptchaChallenge>,
    },

    #[error("Too many requests per second (6): {0}")]
    TooManyRequests(RemoteError),

    #[error("Flood control (9): {0}")]
    FloodControl(RemoteError),

    #[error("Invalid parameter ({}): {}", .0.code, .0.message)]
    InvalidParameter(RemoteError),

    #[error("API error ({}): {}", .0.code, .0.message)]
    Api(RemoteError),

    // Typed projection
    #[error("Projection error: {0}")]
    Projection(String),
}

impl VkError {
    /// Create a VkError from a remote error envelope.
    ///
    /// `captcha` is only consulted for code 14.
    pub fn from_remote(error: RemoteError, captcha: Option<CaptchaChallenge>) -> Self {
        match error.code {
            5 => VkError::UserAuthorizationFailed(error),
            6 => VkError::TooManyRequests(error),
            7 | 15 | 30 | 200 | 201 | 203 | 260 => VkError::AccessDenied(error),
            9 => VkError::FloodControl(error),
            14 => VkError::CaptchaNeeded {
                error,
                challenge: captcha,
            },
            100 | 113 | 125 => VkError::InvalidParameter(error),
            _ => VkError::Api(error),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VkError::Precondition(_) => ErrorKind::Precondition,
            VkError::Transport(_) => ErrorKind::Transport,
            VkError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            VkError::UserAuthorizationFailed(_) => ErrorKind::Authorization,
            VkError::AccessDenied(_) => ErrorKind::PermissionDenied,
            VkError::CaptchaNeeded { .. } => ErrorKind::CaptchaRequired,
            VkError::TooManyRequests(_) | VkError::FloodControl(_) => ErrorKind::RateLimited,
            VkError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            VkError::Api(_) => ErrorKind::Unclassified,
            VkError::Projection(_) => ErrorKind::Projection,
        }
    }

    /// The remote error details, if this error came from an error envelope.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            VkError::UserAuthorizationFailed(e)
            | VkError::AccessDenied(e)
            | VkError::TooManyRequests(e)
            | VkError::FloodControl(e)
            | VkError::InvalidParameter(e)
            | VkError::Api(e) => Some(e),
            VkError::CaptchaNeeded { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the VK error code if this is a remote error.
    pub fn error_code(&self) -> Option<i64> {
        self.remote().map(|e| e.code)
    }

    /// The captcha to answer, if this is a captcha error that carried one.
    pub fn captcha_challenge(&self) -> Option<&CaptchaChallenge> {
        match self {
            VkError::CaptchaNeeded { challenge, .. } => challenge.as_ref(),
            _ => None,
        }
    }

    /// Returns true if the dispatcher retries this error on its own.
    pub fn is_retryable(&self) -> bool {
        match self.kind() {
            ErrorKind::CaptchaRequired => self.captcha_challenge().is_some(),
            ErrorKind::RateLimited => true,
            _ => false,
        }
    }
}

fn captcha_sid(challenge: &Option<CaptchaChallenge>) -> &str {
    challenge.as_ref().map_or("none", |c| c.sid.as_str())
}

impl From<reqwest::Error> for VkError {
    fn from(err: reqwest::Error) -> Self {
        VkError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for VkError {
    fn from(err: serde_json::Error) -> Self {
        VkError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for VkError {
    fn from(err: url::ParseError) -> Self {
        VkError::Precondition(format!("URL parse error: {err}"))
    }
}
