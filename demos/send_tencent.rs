//! Send a templated SMS through the Tencent Cloud sender.
//!
//! Settings come from `config/` and `TENCENT_SMS__*` variables. The demo
//! uses a dry-run requester that prints the payload and reports success;
//! swap in `HttpApiRequester` with your own `RequestSigner` to hit the API.
//!
//! `--params` takes the template parameters as a JSON list, e.g. `'["4321"]'`.
use async_trait::async_trait;
use serde_json::{Value, json};
use std::env;
use std::sync::Arc;
use tencent_sms::prelude::*;

struct DryRunRequester;

#[async_trait]
impl CloudApiRequester for DryRunRequester {
    async fn send_request(
        &self,
        action: ApiAction,
        payload: Value,
        endpoint: Option<&str>,
        credentials: &Credentials,
    ) -> Result<Value, RequesterError> {
        println!(
            "{} {} -> {} as {}\n{}",
            action.action,
            action.version,
            endpoint.unwrap_or(sms_tencent::requester::DEFAULT_ENDPOINT),
            credentials.secret_id,
            serde_json::to_string_pretty(&payload)?
        );
        Ok(json!({ "SendStatusSet": [{ "Code": "Ok", "Message": "dry run" }] }))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    let to = arg_or_env("--to", "SMS_TO");
    let template_id = arg_or_env("--template-id", "SMS_TEMPLATE_ID");
    let params = arg_or_env("--params", "SMS_TEMPLATE_PARAMS");

    let sender = TencentSmsSender::new(
        Arc::new(ConfigSettingProvider::new()?),
        Arc::new(DryRunRequester),
    );
    let message = SmsMessage::new(to)
        .with_property(properties::TEMPLATE_ID, template_id)
        .with_property(properties::TEMPLATE_PARAM_SET, params);

    sender.send(&message).await?;
    println!("Sent via {}", sender.provider());
    Ok(())
}

fn arg_or_env(flag: &str, env_key: &str) -> String {
    let args: Vec<String> = std::env::args().collect();
    if let Some(idx) = args.iter().position(|a| a == flag) {
        if idx + 1 < args.len() {
            return args[idx + 1].clone();
        }
    }
    env::var(env_key)
        .unwrap_or_else(|_| panic!("missing {} (arg {} or env {})", flag, flag, env_key))
}
