use serde::{Deserialize, Deserializer, Serialize};

/// Request-level error reported inside the API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Delivery status for one phone number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendStatus {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub serial_no: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub fee: Option<u32>,
    #[serde(default)]
    pub session_context: Option<String>,
    #[serde(default)]
    pub iso_code: Option<String>,
}

impl SendStatus {
    /// Status code the API uses for an accepted recipient.
    pub const OK: &'static str = "Ok";

    pub fn is_ok(&self) -> bool {
        self.code == Self::OK
    }
}

/// `SendSms` response, i.e. the object found under `Response` in the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendSmsResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub send_status_set: Vec<SendStatus>,
    #[serde(default)]
    pub request_id: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SendStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SendStatus>>::deserialize(deserializer)?.unwrap_or_default())
}
