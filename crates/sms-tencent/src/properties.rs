//! Typed lookups over the message property bag.

use serde_json::Value;
use sms_core::SmsMessage;

use crate::error::TencentSmsError;

pub const TEMPLATE_ID: &str = "templateId";
pub const SMS_SDK_APP_ID: &str = "smsSdkAppId";
pub const SIGN: &str = "sign";
pub const TEMPLATE_PARAM_SET: &str = "templateParamSet";
pub const EXTEND_CODE: &str = "extendCode";
pub const SESSION_CONTEXT: &str = "sessionContext";
pub const SENDER_ID: &str = "senderId";

/// Returns the string stored under `key`, or `fallback` when the property
/// is missing, empty, or not a string.
pub fn resolve_string(
    message: &SmsMessage,
    key: &str,
    fallback: Option<String>,
) -> Option<String> {
    match message.property(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => fallback,
    }
}

/// Reads `templateParamSet`, given either as a string list or as its JSON encoding.
pub fn resolve_template_params(
    message: &SmsMessage,
) -> Result<Option<Vec<String>>, TencentSmsError> {
    match message.property(TEMPLATE_PARAM_SET) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(json)) => serde_json::from_str::<Vec<String>>(json)
            .map(Some)
            .map_err(|e| TencentSmsError::InvalidTemplateParamSet { source: Some(e) }),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(TencentSmsError::InvalidTemplateParamSet { source: None }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(TencentSmsError::InvalidTemplateParamSet { source: None }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> SmsMessage {
        SmsMessage::new("+10000000000")
    }

    #[test]
    fn non_empty_string_ignores_fallback() {
        let msg = message().with_property(SIGN, "Mine");
        assert_eq!(
            resolve_string(&msg, SIGN, Some("Default".into())).as_deref(),
            Some("Mine")
        );
        assert_eq!(resolve_string(&msg, SIGN, None).as_deref(), Some("Mine"));
    }

    #[test]
    fn missing_or_empty_string_uses_fallback() {
        let msg = message().with_property(SIGN, "");
        assert_eq!(
            resolve_string(&msg, SIGN, Some("Default".into())).as_deref(),
            Some("Default")
        );
        assert_eq!(resolve_string(&msg, SIGN, None), None);
        assert_eq!(
            resolve_string(&message(), SIGN, Some("Default".into())).as_deref(),
            Some("Default")
        );
    }

    #[test]
    fn non_string_value_is_a_miss() {
        let msg = message()
            .with_property(EXTEND_CODE, 42)
            .with_property(SENDER_ID, json!(["x"]));
        assert_eq!(
            resolve_string(&msg, EXTEND_CODE, Some("7".into())).as_deref(),
            Some("7")
        );
        assert_eq!(resolve_string(&msg, SENDER_ID, None), None);
    }

    #[test]
    fn template_params_absent_or_null() {
        assert_eq!(resolve_template_params(&message()).unwrap(), None);

        let msg = message().with_property(TEMPLATE_PARAM_SET, Value::Null);
        assert_eq!(resolve_template_params(&msg).unwrap(), None);
    }

    #[test]
    fn template_params_from_list_keep_order() {
        let msg = message().with_property(TEMPLATE_PARAM_SET, vec!["3", "1", "2"]);
        assert_eq!(
            resolve_template_params(&msg).unwrap(),
            Some(vec!["3".to_string(), "1".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn template_params_from_json_string() {
        let msg = message().with_property(TEMPLATE_PARAM_SET, r#"["a","b"]"#);
        assert_eq!(
            resolve_template_params(&msg).unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn template_params_bad_json_is_rejected() {
        for bad in ["not json", r#"{"a":1}"#, "[1,2]"] {
            let msg = message().with_property(TEMPLATE_PARAM_SET, bad);
            let err = resolve_template_params(&msg).unwrap_err();
            assert!(
                matches!(err, TencentSmsError::InvalidTemplateParamSet { source: Some(_) }),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn template_params_unsupported_shapes_are_rejected() {
        for bad in [json!(5), json!(true), json!({"a": "b"}), json!(["a", 1])] {
            let msg = message().with_property(TEMPLATE_PARAM_SET, bad.clone());
            let err = resolve_template_params(&msg).unwrap_err();
            assert!(
                matches!(err, TencentSmsError::InvalidTemplateParamSet { source: None }),
                "{bad}: {err:?}"
            );
        }
    }
}
