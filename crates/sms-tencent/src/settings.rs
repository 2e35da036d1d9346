//! Setting names and the per-send settings snapshot.

use sms_core::SettingProvider;

use crate::requester::Credentials;

const GROUP: &str = "TencentSms";

pub const DEFAULT_SMS_SDK_APP_ID: &str = "TencentSms.DefaultSmsSdkAppId";
pub const DEFAULT_SIGN: &str = "TencentSms.DefaultSign";
pub const DEFAULT_EXTEND_CODE: &str = "TencentSms.DefaultExtendCode";
pub const DEFAULT_SENDER_ID: &str = "TencentSms.DefaultSenderId";
pub const DEFAULT_SECRET_ID: &str = "TencentSms.DefaultSecretId";
pub const DEFAULT_SECRET_KEY: &str = "TencentSms.DefaultSecretKey";
pub const END_POINT: &str = "TencentSms.EndPoint";

/// Every setting name read by the sender.
pub const ALL: [&str; 7] = [
    DEFAULT_SMS_SDK_APP_ID,
    DEFAULT_SIGN,
    DEFAULT_EXTEND_CODE,
    DEFAULT_SENDER_ID,
    DEFAULT_SECRET_ID,
    DEFAULT_SECRET_KEY,
    END_POINT,
];

/// Returns the part of a setting name after the `TencentSms.` group prefix.
pub fn short_name(name: &str) -> Option<&str> {
    name.strip_prefix(GROUP)?.strip_prefix('.')
}

/// Settings captured for a single send.
///
/// Built with [`TencentSmsSettings::load`] at the start of every send and
/// dropped with it; never reuse a snapshot across sends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TencentSmsSettings {
    pub sms_sdk_app_id: Option<String>,
    pub sign: Option<String>,
    pub extend_code: Option<String>,
    pub sender_id: Option<String>,
    pub secret_id: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
}

impl TencentSmsSettings {
    /// Reads every name in [`ALL`] with one [`SettingProvider::get_many`] call.
    pub async fn load(provider: &dyn SettingProvider) -> Self {
        let mut values = provider.get_many(&ALL).await.into_iter();
        let mut next = || values.next().flatten();
        Self {
            sms_sdk_app_id: next(),
            sign: next(),
            extend_code: next(),
            sender_id: next(),
            secret_id: next(),
            secret_key: next(),
            endpoint: next(),
        }
    }

    /// Missing credential settings become empty strings; the API rejects them.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.secret_id.clone().unwrap_or_default(),
            self.secret_key.clone().unwrap_or_default(),
        )
    }
}
