use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::application::{AppError, AppResult, Notifier};
use crate::infrastructure::http::{client_with_timeout, notifier_err};

/// Discord-style chat webhook.
pub struct WebhookNotifier {
    client: reqwest::Client,
    webhook: String,
}

impl WebhookNotifier {
    pub fn new(webhook: String, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            client: client_with_timeout(timeout)?,
            webhook,
        })
    }
}

#[derive(Debug, Serialize)]
struct WebhookTextMsg<'a> {
    content: &'a str,
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn notify(&self, message: &str) -> AppResult<()> {
        if self.webhook.is_empty() {
            return Err(AppError::Notifier("webhook url is empty".into()));
        }

        self.client
            .post(&self.webhook)
            .header("Content-Type", "application/json")
            .json(&WebhookTextMsg { content: message })
            .send()
            .await
            .map_err(notifier_err)?
            .error_for_status()
            .map_err(notifier_err)?;

        Ok(())
    }
}
