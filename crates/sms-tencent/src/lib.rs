//! # Tencent Cloud SMS Provider
//!
//! Tencent Cloud SMS sender implementation for tencent-sms.
//!
//! ## Features
//!
//! - Send templated SMS through the `SendSms` API
//! - Per-message overrides for app id, sign, extend code and sender id,
//!   falling back to configured defaults
//! - Credentials read from settings on every send
//! - Vendor error codes surfaced verbatim
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sms_core::{InMemorySettings, SmsMessage};
//! use sms_tencent::{settings, HttpApiRequester, TencentSmsSender};
//!
//! let store = InMemorySettings::new()
//!     .with(settings::DEFAULT_SMS_SDK_APP_ID, "1400000000")
//!     .with(settings::DEFAULT_SIGN, "MySign")
//!     .with(settings::DEFAULT_SECRET_ID, "AKID...")
//!     .with(settings::DEFAULT_SECRET_KEY, "...");
//! let requester = HttpApiRequester::builder(my_signer).region("ap-guangzhou").build()?;
//! let sender = TencentSmsSender::new(Arc::new(store), Arc::new(requester));
//!
//! sender
//!     .send(&SmsMessage::new("+8613800000000")
//!         .with_property("templateId", "1110")
//!         .with_property("templateParamSet", vec!["4321"]))
//!     .await?;
//! ```

mod error;
pub mod properties;
mod request;
pub mod requester;
mod response;
mod sender;
pub mod settings;

pub use error::{RequesterError, TencentSmsError};
pub use request::{ApiAction, SendSmsRequest, SendSmsRequestBuilder};
pub use requester::{CloudApiRequester, Credentials, RequestSigner, SigningContext};
#[cfg(feature = "reqwest")]
pub use requester::{HttpApiRequester, HttpApiRequesterBuilder};
pub use response::{ApiError, SendSmsResponse, SendStatus};
pub use sender::{build_request, TencentSmsSender};
pub use settings::TencentSmsSettings;
