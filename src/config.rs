use async_trait::async_trait;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use sms_core::SettingProvider;
use sms_tencent::settings;
use std::env;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

/// Application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    /// Tencent Cloud SMS settings
    #[serde(default)]
    pub tencent: TencentConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tencent Cloud SMS settings, one field per `TencentSms.*` setting name.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct TencentConfig {
    /// SMS SDK app id used when a message does not carry `smsSdkAppId`
    pub default_sms_sdk_app_id: Option<String>,
    /// Signature used when a message does not carry `sign`
    pub default_sign: Option<String>,
    /// Extend code used when a message does not carry `extendCode`
    pub default_extend_code: Option<String>,
    /// Sender id used when a message does not carry `senderId`
    pub default_sender_id: Option<String>,
    /// API SecretId
    pub default_secret_id: Option<String>,
    /// API SecretKey
    pub default_secret_key: Option<String>,
    /// API host (default: sms.tencentcloudapi.com)
    pub end_point: Option<String>,
}

impl TencentConfig {
    /// Look up a `TencentSms.*` setting by its full name.
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match settings::short_name(name)? {
            "DefaultSmsSdkAppId" => &self.default_sms_sdk_app_id,
            "DefaultSign" => &self.default_sign,
            "DefaultExtendCode" => &self.default_extend_code,
            "DefaultSenderId" => &self.default_sender_id,
            "DefaultSecretId" => &self.default_secret_id,
            "DefaultSecretKey" => &self.default_secret_key,
            "EndPoint" => &self.end_point,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level or filter directive (default: info)
    pub level: String,
    /// Log format: json or pretty (default: json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/` files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from files under `dir` and environment variables
    pub fn load_from(dir: &str) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default configuration
            .add_source(Config::try_from(&AppConfig::default())?)
            // Add configuration file based on environment
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Add local configuration file (gitignored)
            .add_source(File::with_name(&format!("{}/local", dir)).required(false))
            // Add environment variables (prefixed with TENCENT_SMS_)
            .add_source(Environment::with_prefix("TENCENT_SMS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

/// [`SettingProvider`] backed by the layered configuration.
///
/// Construction fails when the configuration cannot be loaded. After that,
/// every batch of lookups reloads files and environment once, so edits and
/// rotated keys are seen by the next send. A reload that fails keeps the
/// last values that loaded.
#[derive(Debug, Clone)]
pub struct ConfigSettingProvider {
    dir: String,
    last_good: Arc<RwLock<TencentConfig>>,
}

impl ConfigSettingProvider {
    /// Read settings from `config/`.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_dir("config")
    }

    pub fn with_dir(dir: impl Into<String>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        let config = AppConfig::load_from(&dir)?;
        Ok(Self {
            dir,
            last_good: Arc::new(RwLock::new(config.tencent)),
        })
    }

    fn reload(&self) -> TencentConfig {
        match AppConfig::load_from(&self.dir) {
            Ok(config) => {
                let mut last_good = self.last_good.write().unwrap_or_else(PoisonError::into_inner);
                *last_good = config.tencent.clone();
                config.tencent
            }
            Err(e) => {
                warn!(
                    "Failed to reload configuration from {}, keeping previous settings: {}",
                    self.dir, e
                );
                self.last_good
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
            }
        }
    }
}

#[async_trait]
impl SettingProvider for ConfigSettingProvider {
    async fn get_or_null(&self, name: &str) -> Option<String> {
        self.reload().get(name).map(str::to_owned)
    }

    async fn get_many(&self, names: &[&str]) -> Vec<Option<String>> {
        let config = self.reload();
        names
            .iter()
            .map(|name| config.get(name).map(str::to_owned))
            .collect()
    }
}
