//! Transport to the Tencent Cloud API.
//!
//! [`CloudApiRequester`] is the seam the sender talks to. The bundled
//! [`HttpApiRequester`] posts JSON over HTTPS and unwraps the `Response`
//! envelope; computing the `Authorization` header is delegated to a
//! [`RequestSigner`] supplied by the caller.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::RequesterError;
use crate::request::ApiAction;

/// Host used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "sms.tencentcloudapi.com";

/// Tencent Cloud API key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub secret_id: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
pub trait CloudApiRequester: Send + Sync {
    /// Perform one API call and return the object found under `Response`.
    ///
    /// `endpoint` is a host name (or full URL); `None` selects the
    /// requester's default.
    async fn send_request(
        &self,
        action: ApiAction,
        payload: Value,
        endpoint: Option<&str>,
        credentials: &Credentials,
    ) -> Result<Value, RequesterError>;
}

/// Everything a signer may need to authorize one request.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext<'a> {
    pub action: ApiAction,
    pub host: &'a str,
    pub region: Option<&'a str>,
    /// Unix seconds, also sent as `X-TC-Timestamp`.
    pub timestamp: i64,
    pub payload: &'a [u8],
}

/// Produces the `Authorization` header value for a request.
pub trait RequestSigner: Send + Sync {
    fn authorization(
        &self,
        context: &SigningContext<'_>,
        credentials: &Credentials,
    ) -> Result<String, RequesterError>;
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: Value,
}

/// Unwrap the `{"Response": {...}}` envelope every API reply comes in.
pub fn decode_envelope(body: &str) -> Result<Value, RequesterError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    Ok(envelope.response)
}

/// Split a configured endpoint into the host used for signing and the URL to post to.
#[cfg_attr(not(feature = "reqwest"), allow(dead_code))]
fn endpoint_url(endpoint: &str) -> (String, String) {
    let trimmed = endpoint.trim().trim_end_matches('/');
    for scheme in ["https://", "http://"] {
        if let Some(host) = trimmed.strip_prefix(scheme) {
            return (host.to_owned(), format!("{trimmed}/"));
        }
    }
    (trimmed.to_owned(), format!("https://{trimmed}/"))
}

#[cfg(feature = "reqwest")]
pub use http::{HttpApiRequester, HttpApiRequesterBuilder};

#[cfg(feature = "reqwest")]
mod http {
    use std::sync::Arc;
    use std::time::Duration;

    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use time::OffsetDateTime;
    use tracing::debug;

    use super::*;

    /// Builder for [`HttpApiRequester`].
    pub struct HttpApiRequesterBuilder {
        signer: Arc<dyn RequestSigner>,
        default_endpoint: String,
        region: Option<String>,
        timeout: Option<Duration>,
        user_agent: Option<String>,
    }

    impl HttpApiRequesterBuilder {
        pub fn new(signer: Arc<dyn RequestSigner>) -> Self {
            Self {
                signer,
                default_endpoint: DEFAULT_ENDPOINT.to_owned(),
                region: None,
                timeout: None,
                user_agent: None,
            }
        }

        /// Endpoint used when the caller passes none.
        pub fn default_endpoint(mut self, endpoint: impl Into<String>) -> Self {
            self.default_endpoint = endpoint.into();
            self
        }

        /// Region sent as `X-TC-Region`, e.g. `ap-guangzhou`.
        pub fn region(mut self, region: impl Into<String>) -> Self {
            self.region = Some(region.into());
            self
        }

        /// HTTP timeout applied to the entire request.
        pub fn timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }

        pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.user_agent = Some(user_agent.into());
            self
        }

        pub fn build(self) -> Result<HttpApiRequester, RequesterError> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(user_agent) = self.user_agent {
                builder = builder.user_agent(user_agent);
            }

            Ok(HttpApiRequester {
                http: builder.build()?,
                signer: self.signer,
                default_endpoint: self.default_endpoint,
                region: self.region,
            })
        }
    }

    /// reqwest-backed [`CloudApiRequester`].
    #[derive(Clone)]
    pub struct HttpApiRequester {
        http: reqwest::Client,
        signer: Arc<dyn RequestSigner>,
        default_endpoint: String,
        region: Option<String>,
    }

    impl HttpApiRequester {
        pub fn new(signer: Arc<dyn RequestSigner>) -> Self {
            Self {
                http: reqwest::Client::new(),
                signer,
                default_endpoint: DEFAULT_ENDPOINT.to_owned(),
                region: None,
            }
        }

        pub fn builder(signer: Arc<dyn RequestSigner>) -> HttpApiRequesterBuilder {
            HttpApiRequesterBuilder::new(signer)
        }
    }

    impl fmt::Debug for HttpApiRequester {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("HttpApiRequester")
                .field("default_endpoint", &self.default_endpoint)
                .field("region", &self.region)
                .finish_non_exhaustive()
        }
    }

    #[async_trait]
    impl CloudApiRequester for HttpApiRequester {
        async fn send_request(
            &self,
            action: ApiAction,
            payload: Value,
            endpoint: Option<&str>,
            credentials: &Credentials,
        ) -> Result<Value, RequesterError> {
            let endpoint = endpoint
                .filter(|e| !e.trim().is_empty())
                .unwrap_or(&self.default_endpoint);
            let (host, url) = endpoint_url(endpoint);
            let body = serde_json::to_vec(&payload)?;
            let timestamp = OffsetDateTime::now_utc().unix_timestamp();

            let authorization = self.signer.authorization(
                &SigningContext {
                    action,
                    host: &host,
                    region: self.region.as_deref(),
                    timestamp,
                    payload: &body,
                },
                credentials,
            )?;

            debug!(
                "Calling Tencent Cloud {} {} at {}",
                action.action, action.version, url
            );

            let mut req = self
                .http
                .post(&url)
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .header(AUTHORIZATION, authorization)
                .header("X-TC-Action", action.action)
                .header("X-TC-Version", action.version)
                .header("X-TC-Timestamp", timestamp.to_string());
            if let Some(region) = &self.region {
                req = req.header("X-TC-Region", region);
            }

            let res = req.body(body).send().await?;
            let status = res.status();
            let text = res.text().await?;
            debug!("Tencent Cloud {} answered HTTP {}", action.action, status);

            if !status.is_success() {
                let body = if text.trim().is_empty() { None } else { Some(text) };
                return Err(RequesterError::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            decode_envelope(&text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_is_unwrapped() {
        let body = r#"{"Response": {"SendStatusSet": [], "RequestId": "r-1"}}"#;
        assert_eq!(
            decode_envelope(body).unwrap(),
            json!({"SendStatusSet": [], "RequestId": "r-1"})
        );
    }

    #[test]
    fn missing_envelope_is_a_decode_error() {
        for body in ["{}", "not json", r#"{"response": {}}"#] {
            assert!(
                matches!(decode_envelope(body), Err(RequesterError::Decode(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn endpoint_url_accepts_hosts_and_urls() {
        assert_eq!(
            endpoint_url("sms.tencentcloudapi.com"),
            (
                "sms.tencentcloudapi.com".to_owned(),
                "https://sms.tencentcloudapi.com/".to_owned()
            )
        );
        assert_eq!(
            endpoint_url("http://localhost:8080/"),
            ("localhost:8080".to_owned(), "http://localhost:8080/".to_owned())
        );
    }

    #[test]
    fn credentials_debug_hides_secret_key() {
        let rendered = format!("{:?}", Credentials::new("AKID", "top-secret"));
        assert!(rendered.contains("AKID"));
        assert!(!rendered.contains("top-secret"));
    }

    #[cfg(feature = "reqwest")]
    mod http {
        use super::*;
        use std::sync::{Arc, Mutex};

        #[derive(Default)]
        struct RefusingSigner {
            seen: Mutex<Option<(String, Option<String>, Vec<u8>)>>,
        }

        impl RequestSigner for RefusingSigner {
            fn authorization(
                &self,
                context: &SigningContext<'_>,
                _credentials: &Credentials,
            ) -> Result<String, RequesterError> {
                *self.seen.lock().unwrap() = Some((
                    context.host.to_owned(),
                    context.region.map(str::to_owned),
                    context.payload.to_vec(),
                ));
                Err(RequesterError::Signing("no key".into()))
            }
        }

        #[tokio::test]
        async fn signing_failure_stops_before_the_network() {
            let signer = Arc::new(RefusingSigner::default());
            let requester = HttpApiRequester::builder(signer.clone())
                .default_endpoint("sms.example.invalid")
                .region("ap-guangzhou")
                .build()
                .unwrap();

            let err = requester
                .send_request(
                    ApiAction::SEND_SMS,
                    json!({"PhoneNumberSet": ["+1"]}),
                    None,
                    &Credentials::new("id", "key"),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, RequesterError::Signing(_)));

            let (host, region, payload) = signer.seen.lock().unwrap().clone().unwrap();
            assert_eq!(host, "sms.example.invalid");
            assert_eq!(region.as_deref(), Some("ap-guangzhou"));
            assert_eq!(
                serde_json::from_slice::<Value>(&payload).unwrap(),
                json!({"PhoneNumberSet": ["+1"]})
            );
        }

        #[tokio::test]
        async fn explicit_endpoint_overrides_default() {
            let signer = Arc::new(RefusingSigner::default());
            let requester = HttpApiRequester::new(signer.clone());

            let _ = requester
                .send_request(
                    ApiAction::SEND_SMS,
                    json!({}),
                    Some("sms.ap-hongkong.tencentcloudapi.com"),
                    &Credentials::new("id", "key"),
                )
                .await;

            let (host, region, _) = signer.seen.lock().unwrap().clone().unwrap();
            assert_eq!(host, "sms.ap-hongkong.tencentcloudapi.com");
            assert_eq!(region, None);
        }
    }
}
