/// Response envelope parsing and error classification.
///
/// The API answers every call with either `{"response": ...}` or
/// `{"error": {...}}`. The body is parsed into a `serde_json::Value` tree and
/// inspected by pattern matching; an `error` key always wins over `response`.
use log::debug;
use serde_json::{Map, Value};

use crate::captcha::CaptchaChallenge;
use crate::errors::{RemoteError, VkError};

/// A parsed response: success payload or remote failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    /// The `response` value. `Value::Null` when the key is absent.
    Success(Value),
    Failure {
        error: RemoteError,
        captcha: Option<CaptchaChallenge>,
    },
}

impl ResponseEnvelope {
    /// Convert into the success payload or the classified error.
    pub fn into_result(self) -> Result<Value, VkError> {
        match self {
            ResponseEnvelope::Success(payload) => Ok(payload),
            ResponseEnvelope::Failure { error, captcha } => {
                Err(VkError::from_remote(error, captcha))
            }
        }
    }
}

/// Parse raw response text into an envelope.
pub fn parse_envelope(text: &str) -> Result<ResponseEnvelope, VkError> {
    let root: Value = serde_json::from_str(text).map_err(|e| {
        let snippet: String = text.chars().take(200).collect();
        VkError::MalformedResponse(format!("{e}; body: {snippet}"))
    })?;

    let mut root = match root {
        Value::Object(map) => map,
        other => {
            return Err(VkError::MalformedResponse(format!(
                "expected a JSON object envelope, got {}",
                json_type(&other)
            )))
        }
    };

    if let Some(error) = root.remove("error") {
        let (error, captcha) = parse_error(error)?;
        debug!(
            "envelope.parse failure code={} params={}",
            error.code,
            error.request_params.len()
        );
        return Ok(ResponseEnvelope::Failure { error, captcha });
    }

    Ok(ResponseEnvelope::Success(
        root.remove("response").unwrap_or(Value::Null),
    ))
}

/// Parse and classify in one step: the success payload or a typed error.
pub fn classify(text: &str) -> Result<Value, VkError> {
    parse_envelope(text)?.into_result()
}

fn parse_error(error: Value) -> Result<(RemoteError, Option<CaptchaChallenge>), VkError> {
    let error = match error {
        Value::Object(map) => map,
        other => {
            return Err(VkError::MalformedResponse(format!(
                "error must be an object, got {}",
                json_type(&other)
            )))
        }
    };

    let code = match error.get("error_code") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| VkError::MalformedResponse("error without integer error_code".into()))?;

    let message = match error.get("error_msg") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    let request_params = match error.get("request_params") {
        Some(Value::Array(items)) => items.iter().filter_map(key_value_pair).collect(),
        _ => Vec::new(),
    };

    let captcha = match (string_field(&error, "captcha_sid"), string_field(&error, "captcha_img")) {
        (Some(sid), Some(image_url)) => Some(CaptchaChallenge { sid, image_url }),
        (Some(sid), None) => Some(CaptchaChallenge {
            sid,
            image_url: String::new(),
        }),
        _ => None,
    };

    Ok((
        RemoteError {
            code,
            message,
            request_params,
        },
        captcha,
    ))
}

fn key_value_pair(item: &Value) -> Option<(String, String)> {
    let Value::Object(map) = item else {
        return None;
    };
    let key = string_field(map, "key")?;
    let value = string_field(map, "value").unwrap_or_default();
    Some((key, value))
}

/// Read a field as a string; numbers are rendered in their JSON form.
fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
