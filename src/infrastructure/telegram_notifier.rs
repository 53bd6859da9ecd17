use std::time::Duration;

use async_trait::async_trait;

use crate::application::{AppResult, Notifier};
use crate::infrastructure::http::{client_with_timeout, notifier_err};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API `sendMessage`, form encoded.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String, timeout: Duration) -> AppResult<Self> {
        Ok(Self {
            client: client_with_timeout(timeout)?,
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token,
            chat_id,
        })
    }

    pub fn with_endpoint(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> AppResult<()> {
        self.client
            .post(self.send_message_url())
            .form(&[("chat_id", self.chat_id.as_str()), ("text", message)])
            .send()
            .await
            .map_err(notifier_err)?
            .error_for_status()
            .map_err(notifier_err)?;

        Ok(())
    }
}
