/// Captcha challenge issued by the API (error 14) and the solver hook used to
/// answer it.
use serde::{Deserialize, Serialize};

use crate::errors::VkError;

/// A captcha the caller must solve before the request can be re-issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaChallenge {
    /// `captcha_sid` from the error envelope, echoed back on retry.
    pub sid: String,
    /// `captcha_img` from the error envelope.
    pub image_url: String,
}

/// Resolves a captcha challenge to the text shown on the image.
///
/// Called at most once per dispatched call. Implementations usually hand the
/// image to a human or a recognition service and block until an answer
/// arrives.
pub trait CaptchaSolver: Send + Sync {
    fn resolve(&self, challenge: &CaptchaChallenge) -> Result<String, VkError>;
}

impl<F> CaptchaSolver for F
where
    F: Fn(&CaptchaChallenge) -> Result<String, VkError> + Send + Sync,
{
    fn resolve(&self, challenge: &CaptchaChallenge) -> Result<String, VkError> {
        self(challenge)
    }
}
