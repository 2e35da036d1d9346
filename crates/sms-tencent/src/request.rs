use serde::Serialize;

/// Action/version pair addressed by a Tencent Cloud API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiAction {
    pub service: &'static str,
    pub action: &'static str,
    pub version: &'static str,
}

impl ApiAction {
    pub const SEND_SMS: ApiAction = ApiAction {
        service: "sms",
        action: "SendSms",
        version: "2021-01-11",
    };
}

/// `SendSms` request body, serialized with the vendor's field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendSmsRequest {
    pub phone_number_set: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_sdk_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_param_set: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
}

impl SendSmsRequest {
    /// Start a request addressed to exactly one phone number.
    pub fn builder(phone_number: impl Into<String>) -> SendSmsRequestBuilder {
        SendSmsRequestBuilder {
            request: SendSmsRequest {
                phone_number_set: vec![phone_number.into()],
                ..Default::default()
            },
        }
    }
}

/// Assembles a [`SendSmsRequest`] from already-resolved values.
#[derive(Debug, Clone)]
pub struct SendSmsRequestBuilder {
    request: SendSmsRequest,
}

impl SendSmsRequestBuilder {
    pub fn template_id(mut self, value: Option<String>) -> Self {
        self.request.template_id = value;
        self
    }

    pub fn sms_sdk_app_id(mut self, value: Option<String>) -> Self {
        self.request.sms_sdk_app_id = value;
        self
    }

    pub fn sign_name(mut self, value: Option<String>) -> Self {
        self.request.sign_name = value;
        self
    }

    pub fn template_param_set(mut self, value: Option<Vec<String>>) -> Self {
        self.request.template_param_set = value;
        self
    }

    pub fn extend_code(mut self, value: Option<String>) -> Self {
        self.request.extend_code = value;
        self
    }

    pub fn session_context(mut self, value: Option<String>) -> Self {
        self.request.session_context = value;
        self
    }

    pub fn sender_id(mut self, value: Option<String>) -> Self {
        self.request.sender_id = value;
        self
    }

    pub fn build(self) -> SendSmsRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_vendor_field_names() {
        let request = SendSmsRequest::builder("+8613800000000")
            .template_id(Some("1110".into()))
            .sms_sdk_app_id(Some("1400000000".into()))
            .sign_name(Some("Sign".into()))
            .template_param_set(Some(vec!["1234".into(), "5".into()]))
            .extend_code(Some("01".into()))
            .session_context(Some("ctx".into()))
            .sender_id(Some("sender".into()))
            .build();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "PhoneNumberSet": ["+8613800000000"],
                "TemplateId": "1110",
                "SmsSdkAppId": "1400000000",
                "SignName": "Sign",
                "TemplateParamSet": ["1234", "5"],
                "ExtendCode": "01",
                "SessionContext": "ctx",
                "SenderId": "sender"
            })
        );
    }

    #[test]
    fn absent_options_are_omitted() {
        let request = SendSmsRequest::builder("+10000000000")
            .template_id(Some("T1".into()))
            .build();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "PhoneNumberSet": ["+10000000000"], "TemplateId": "T1" })
        );
    }
}
