use std::sync::Arc;

use async_trait::async_trait;
use sms_core::{SettingProvider, SmsError, SmsMessage, SmsSender};
use tracing::{debug, info};

use crate::error::TencentSmsError;
use crate::properties::{self, resolve_string, resolve_template_params};
use crate::request::{ApiAction, SendSmsRequest};
use crate::requester::CloudApiRequester;
use crate::response::SendSmsResponse;
use crate::settings::TencentSmsSettings;

const PROVIDER: &str = "tencent";

/// Sends templated SMS through Tencent Cloud.
///
/// Settings and credentials are read from the [`SettingProvider`] on every
/// send, so rotated keys take effect without rebuilding the sender.
#[derive(Clone)]
pub struct TencentSmsSender {
    settings: Arc<dyn SettingProvider>,
    requester: Arc<dyn CloudApiRequester>,
}

impl TencentSmsSender {
    pub fn new(
        settings: Arc<dyn SettingProvider>,
        requester: Arc<dyn CloudApiRequester>,
    ) -> Self {
        Self {
            settings,
            requester,
        }
    }

    /// Stable provider key.
    pub fn provider(&self) -> &'static str {
        PROVIDER
    }

    /// Send `message` to its phone number using the template named by its
    /// `templateId` property.
    ///
    /// Errors:
    /// - [`TencentSmsError::InvalidTemplateParamSet`] before any network call,
    /// - [`TencentSmsError::SmsSending`] when the API rejects the request or
    ///   the recipient's status is not `Ok`,
    /// - [`TencentSmsError::Transport`] as reported by the requester.
    pub async fn send(&self, message: &SmsMessage) -> Result<(), TencentSmsError> {
        let settings = TencentSmsSettings::load(self.settings.as_ref()).await;
        let request = build_request(message, &settings)?;

        info!(
            "Sending SMS via Tencent Cloud to {} with template {}",
            message.phone_number,
            request.template_id.as_deref().unwrap_or("<none>")
        );

        let payload = serde_json::to_value(&request)
            .map_err(|e| TencentSmsError::Transport(e.into()))?;
        let raw = self
            .requester
            .send_request(
                ApiAction::SEND_SMS,
                payload,
                settings.endpoint.as_deref(),
                &settings.credentials(),
            )
            .await?;
        let response: SendSmsResponse =
            serde_json::from_value(raw).map_err(|e| TencentSmsError::Transport(e.into()))?;

        check_response(response)?;

        debug!("Tencent Cloud accepted SMS to {}", message.phone_number);
        Ok(())
    }
}

/// Resolve every request field from message properties, falling back to settings.
pub fn build_request(
    message: &SmsMessage,
    settings: &TencentSmsSettings,
) -> Result<SendSmsRequest, TencentSmsError> {
    Ok(SendSmsRequest::builder(message.phone_number.clone())
        .template_id(resolve_string(message, properties::TEMPLATE_ID, None))
        .sms_sdk_app_id(resolve_string(
            message,
            properties::SMS_SDK_APP_ID,
            settings.sms_sdk_app_id.clone(),
        ))
        .sign_name(resolve_string(message, properties::SIGN, settings.sign.clone()))
        .template_param_set(resolve_template_params(message)?)
        .extend_code(resolve_string(
            message,
            properties::EXTEND_CODE,
            settings.extend_code.clone(),
        ))
        .session_context(resolve_string(message, properties::SESSION_CONTEXT, None))
        .sender_id(resolve_string(
            message,
            properties::SENDER_ID,
            settings.sender_id.clone(),
        ))
        .build())
}

/// A request-level error wins; otherwise only the first status counts,
/// since exactly one recipient is sent. No statuses at all is a success.
fn check_response(response: SendSmsResponse) -> Result<(), TencentSmsError> {
    if let Some(error) = response.error {
        return Err(TencentSmsError::SmsSending {
            code: error.code,
            message: error.message,
        });
    }

    match response.send_status_set.into_iter().next() {
        Some(status) if !status.is_ok() => Err(TencentSmsError::SmsSending {
            code: status.code,
            message: status.message,
        }),
        _ => Ok(()),
    }
}

#[async_trait]
impl SmsSender for TencentSmsSender {
    async fn send(&self, message: &SmsMessage) -> Result<(), SmsError> {
        TencentSmsSender::send(self, message).await.map_err(Into::into)
    }
}
