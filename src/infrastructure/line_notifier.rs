use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::{AppResult, Notifier};
use crate::infrastructure::http::{client_with_timeout, notifier_err};

pub const LINE_PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";

/// LINE Messaging API push to a single user.
pub struct LinePushNotifier {
    client: reqwest::Client,
    endpoint: String,
    channel_token: String,
    user_id: String,
}

impl LinePushNotifier {
    pub fn new(channel_token: String, user_id: String, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            client: client_with_timeout(timeout)?,
            endpoint: LINE_PUSH_ENDPOINT.to_string(),
            channel_token,
            user_id,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct PushMsg<'a> {
    to: &'a str,
    messages: [PushText<'a>; 1],
}

#[derive(Debug, Serialize)]
struct PushText<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

#[async_trait]
impl Notifier for LinePushNotifier {
    fn name(&self) -> &'static str {
        "line"
    }

    async fn notify(&self, message: &str) -> AppResult<()> {
        if self.channel_token.is_empty() || self.user_id.is_empty() {
            tracing::debug!("LINE token or user id unset, skipping");
            return Ok(());
        }

        let payload = PushMsg {
            to: &self.user_id,
            messages: [PushText {
                kind: "text",
                text: message,
            }],
        };

        self.client
            .post(&self.endpoint)
            .bearer_auth(&self.channel_token)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(notifier_err)?
            .error_for_status()
            .map_err(notifier_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_body_shape() {
        let body = serde_json::to_value(PushMsg {
            to: "U123",
            messages: [PushText {
                kind: "text",
                text: "GET / 500",
            }],
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "to": "U123",
                "messages": [{ "type": "text", "text": "GET / 500" }]
            })
        );
    }

    #[tokio::test]
    async fn unset_credentials_is_a_no_op() {
        // unroutable endpoint: any real request would fail
        let n = LinePushNotifier::new(String::new(), "U1".into(), Duration::from_millis(50))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/push");
        assert!(n.notify("x").await.is_ok());

        let n = LinePushNotifier::new("tok".into(), String::new(), Duration::from_millis(50))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/push");
        assert!(n.notify("x").await.is_ok());
    }
}
