//! VK API SDK for Rust.
//!
//! A synchronous client for the VK social network HTTP API. Every method
//! goes through the same pipeline:
//!
//! 1. parameters are normalized into an ordered [`VkParameters`] bag,
//! 2. [`VkApi`] appends `v`, `lang` and `access_token` and calls the
//!    [`Transport`],
//! 3. the response envelope is classified into a payload or a typed
//!    [`VkError`],
//! 4. the payload is projected into the declared result type.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vk_sdk::{ApiConfig, VkApi};
//!
//! fn main() -> Result<(), vk_sdk::VkError> {
//!     let api = VkApi::new(ApiConfig::new("access-token"))?;
//!
//!     // Typed method groups
//!     let online = api.account().set_online(None)?;
//!     println!("online: {online}");
//!
//!     let items = api.market().get(-1, None, Some(10), None, None)?;
//!     for item in items.iter() {
//!         println!("{}: {}", item.id, item.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Raw Calls
//!
//! Methods without a typed wrapper are called through [`VkApi::call`] and
//! the [`projection`] helpers:
//!
//! ```rust,no_run
//! use vk_sdk::{projection, ApiConfig, VkApi, VkParameters};
//!
//! fn main() -> Result<(), vk_sdk::VkError> {
//!     let api = VkApi::new(ApiConfig::from_env()?)?;
//!     let params = VkParameters::new()
//!         .with("user_ids", vec![1, 2])
//!         .with("fields", "city");
//!     let payload = api.call("users.get", &params)?;
//!     let users: Vec<serde_json::Value> = projection::to_vec(payload)?;
//!     println!("{} users", users.len());
//!     Ok(())
//! }
//! ```
//!
//! # Retries
//!
//! Captcha errors (14) are answered once through a [`CaptchaSolver`]
//! installed with [`VkApi::with_captcha_solver`]. Rate-limit errors (6, 9)
//! are retried according to [`RateLimitPolicy`]. Everything else is returned
//! immediately.
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/)
//! facade and warn-level logs on retries. Access tokens are never logged.
//!
//! # Errors
//!
//! All fallible operations return [`VkError`]. Use [`VkError::kind`] for the
//! coarse category and [`VkError::remote`] for the original code, message
//! and echoed request parameters.
pub mod account;
pub mod api;
pub mod captcha;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod flags;
pub mod market;
pub mod models;
pub mod params;
pub mod projection;
pub mod transport;

// Re-export primary types for convenience.
pub use api::VkApi;
pub use captcha::{CaptchaChallenge, CaptchaSolver};
pub use config::{ApiConfig, ApiVersion, RateLimitPolicy, DEFAULT_API_HOST, DEFAULT_API_VERSION};
pub use envelope::{classify, parse_envelope, ResponseEnvelope};
pub use errors::{ErrorKind, RemoteError, VkError};
pub use flags::FlagSet;
pub use models::*;
pub use params::{IntoParameters, ParamValue, VkParameters};
pub use projection::Listing;
pub use transport::{HttpTransport, Transport};
