//! # SMS Core
//!
//! Core traits and types shared by the SMS sender backends.
//!
//! This crate provides the fundamental building blocks for SMS operations:
//! - [`SmsSender`] trait for sending SMS messages
//! - [`SmsMessage`] with its weakly-typed property bag
//! - [`SettingProvider`] for reading named settings at send time
//! - Common error type [`SmsError`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use sms_core::{SmsMessage, SmsSender};
//!
//! // Any SMS backend implements SmsSender
//! let message = SmsMessage::new("+8613800000000")
//!     .with_property("templateId", "1234567")
//!     .with_property("templateParamSet", vec!["4321"]);
//! sender.send(&message).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::{Arc, PoisonError, RwLock};

/// Errors that can occur during SMS operations
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The provider rejected the request or the delivery for the recipient.
    #[error("sms sending failed: {code}: {message}")]
    Sending { code: String, message: String },
    /// Invalid message contents (bad property shape, etc.)
    #[error("invalid request: {0}")]
    Invalid(String),
    /// Transport-level failure, kept as reported by the transport.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
}

impl SmsError {
    /// Provider error code for [`SmsError::Sending`].
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Sending { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Value stored in a message property bag.
///
/// Backends read strings and string arrays out of it; any other shape is
/// treated by each accessor according to its own rules.
pub type PropertyValue = serde_json::Value;

/// An outbound SMS addressed to a single phone number.
///
/// Provider specific options (template ids, signatures, ...) travel in
/// `properties` keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub phone_number: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl SmsMessage {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            properties: HashMap::new(),
        }
    }

    /// Set a property, replacing any previous value under `key`.
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a single SMS. Succeeds only when the provider accepted it.
    async fn send(&self, message: &SmsMessage) -> Result<(), SmsError>;
}

/// Read-only access to named settings.
///
/// Implementations must not cache on behalf of the caller: senders read
/// settings on every send so that rotated values take effect immediately.
#[async_trait]
pub trait SettingProvider: Send + Sync {
    async fn get_or_null(&self, name: &str) -> Option<String>;

    /// Read several settings at once, in the order of `names`.
    ///
    /// Providers backed by a reloadable source override this to answer
    /// every name from a single load.
    async fn get_many(&self, names: &[&str]) -> Vec<Option<String>> {
        let mut values = Vec::with_capacity(names.len());
        for name in names {
            values.push(self.get_or_null(name).await);
        }
        values
    }
}

/// Thread-safe in-memory settings store.
///
/// Clones share the same underlying map, so a value updated through one
/// handle is visible to every sender holding another.
#[derive(Debug, Default, Clone)]
pub struct InMemorySettings {
    map: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(name.into(), value.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(name)
    }
}

#[async_trait]
impl SettingProvider for InMemorySettings {
    async fn get_or_null(&self, name: &str) -> Option<String> {
        let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
        map.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_properties_accept_strings_and_lists() {
        let msg = SmsMessage::new("+10000000000")
            .with_property("templateId", "T1")
            .with_property("templateParamSet", vec!["a", "b"]);

        assert_eq!(msg.phone_number, "+10000000000");
        assert_eq!(msg.property("templateId"), Some(&json!("T1")));
        assert_eq!(msg.property("templateParamSet"), Some(&json!(["a", "b"])));
        assert!(msg.property("sign").is_none());
    }

    #[test]
    fn message_deserializes_without_properties() {
        let msg: SmsMessage = serde_json::from_str(r#"{"phone_number":"+1"}"#).unwrap();
        assert!(msg.properties.is_empty());
    }

    #[tokio::test]
    async fn in_memory_settings_are_shared_between_clones() {
        let settings = InMemorySettings::new().with("a", "1");
        let other = settings.clone();

        assert_eq!(other.get_or_null("a").await.as_deref(), Some("1"));

        settings.set("a", "2");
        assert_eq!(other.get_or_null("a").await.as_deref(), Some("2"));

        assert_eq!(other.remove("a").as_deref(), Some("2"));
        assert!(settings.get_or_null("a").await.is_none());
    }

    #[tokio::test]
    async fn get_many_answers_in_order() {
        let settings = InMemorySettings::new().with("a", "1").with("c", "3");
        assert_eq!(
            settings.get_many(&["c", "b", "a"]).await,
            vec![Some("3".to_string()), None, Some("1".to_string())]
        );
    }

    #[test]
    fn sending_error_exposes_code() {
        let err = SmsError::Sending {
            code: "LimitExceeded".into(),
            message: "quota".into(),
        };
        assert_eq!(err.code(), Some("LimitExceeded"));
        assert_eq!(err.to_string(), "sms sending failed: LimitExceeded: quota");
        assert!(SmsError::Invalid("x".into()).code().is_none());
    }
}
