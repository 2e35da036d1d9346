//! # Tencent SMS
//!
//! Send templated SMS through Tencent Cloud behind a provider-agnostic
//! [`SmsSender`](sms_core::SmsSender) interface.
//!
//! ## Features
//!
//! - **Template sending**: one `SendSms` call per message, one recipient per call
//! - **Per-message overrides**: app id, sign, extend code and sender id fall back to settings
//! - **Live settings**: credentials and defaults are re-read on every send
//! - **Uniform errors**: vendor codes and messages are surfaced verbatim
//! - **Comprehensive configuration**: file and environment based settings
//! - **Observability**: structured logging via `tracing`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tencent_sms::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     init_tracing(&config.logging)?;
//!
//!     let requester = HttpApiRequester::builder(Arc::new(MySigner)).build()?;
//!     let sender = TencentSmsSender::new(
//!         Arc::new(ConfigSettingProvider::new()?),
//!         Arc::new(requester),
//!     );
//!
//!     sender
//!         .send(&SmsMessage::new("+8613800000000")
//!             .with_property("templateId", "1110")
//!             .with_property("templateParamSet", vec!["4321"]))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Settings are read from `config/default`, `config/{RUN_MODE}`,
//! `config/local` and `TENCENT_SMS__*` environment variables:
//!
//! ```text
//! TENCENT_SMS__TENCENT__DEFAULT_SMS_SDK_APP_ID=1400000000
//! TENCENT_SMS__TENCENT__DEFAULT_SIGN=MySign
//! TENCENT_SMS__TENCENT__DEFAULT_SECRET_ID=AKID...
//! TENCENT_SMS__TENCENT__DEFAULT_SECRET_KEY=...
//! TENCENT_SMS__LOGGING__FORMAT=pretty
//! ```

pub mod config;
pub mod telemetry;

pub use crate::config::*;

/// Common imports for Tencent SMS usage
pub mod prelude {
    pub use crate::config::{AppConfig, ConfigSettingProvider, LoggingConfig, TencentConfig};
    pub use crate::telemetry::{init_tracing, TelemetryError};
    pub use sms_core::*;
    pub use sms_tencent::{
        properties, settings, ApiAction, CloudApiRequester, Credentials, HttpApiRequester,
        RequestSigner, RequesterError, SigningContext, TencentSmsError, TencentSmsSender,
    };
}
