use sms_core::SmsError;

/// Failures reported by the transport that talks to the Tencent Cloud API.
#[derive(Debug, thiserror::Error)]
pub enum RequesterError {
    /// HTTP client failure (DNS, TLS, timeouts, ...).
    #[cfg(feature = "reqwest")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },
    /// Response body was not a well-formed API envelope.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Request payload could not be signed.
    #[error("signing failed: {0}")]
    Signing(String),
}

/// Errors returned by [`TencentSmsSender`](crate::TencentSmsSender).
#[derive(Debug, thiserror::Error)]
pub enum TencentSmsError {
    /// `templateParamSet` held something other than a string list or its JSON encoding.
    #[error("invalid template param set")]
    InvalidTemplateParamSet {
        #[source]
        source: Option<serde_json::Error>,
    },
    /// Tencent Cloud rejected the request or the recipient's delivery.
    #[error("sms sending failed: {code}: {message}")]
    SmsSending { code: String, message: String },
    #[error(transparent)]
    Transport(#[from] RequesterError),
}

impl From<TencentSmsError> for SmsError {
    fn from(err: TencentSmsError) -> Self {
        match err {
            TencentSmsError::InvalidTemplateParamSet {
                source: Some(ref source),
            } => SmsError::Invalid(format!("{err}: {source}")),
            TencentSmsError::InvalidTemplateParamSet { source: None } => {
                SmsError::Invalid(err.to_string())
            }
            TencentSmsError::SmsSending { code, message } => SmsError::Sending { code, message },
            TencentSmsError::Transport(e) => SmsError::Transport(Box::new(e)),
        }
    }
}
