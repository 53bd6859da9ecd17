use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::application::{AppError, AppResult, Notifier};

pub const DEFAULT_SUBJECT: &str = "5xx alert";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String, // falls back to username when unset
    pub to: String,
    pub subject: String,
}

/// Plain-text mail over an SMTP relay with PLAIN auth; STARTTLS when the relay offers it.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    settings: SmtpSettings,
}

impl EmailNotifier {
    pub fn new(settings: SmtpSettings, timeout: Duration) -> AppResult<Self> {
        let tls = TlsParameters::new(settings.host.clone())
            .map_err(|e| AppError::Config(format!("smtp tls for {}: {e}", settings.host)))?;
        let creds = Credentials::new(settings.username.clone(), settings.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(Tls::Opportunistic(tls))
            .credentials(creds)
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport,
            settings,
        })
    }

    fn build_message(&self, body: &str) -> AppResult<Message> {
        let from = if self.settings.from.is_empty() {
            &self.settings.username
        } else {
            &self.settings.from
        };

        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::Notifier(format!("invalid from address {from}: {e}")))?,
            )
            .to(self
                .settings
                .to
                .parse()
                .map_err(|e| AppError::Notifier(format!("invalid to address: {e}")))?)
            .subject(self.settings.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Notifier(format!("failed to build email: {e}")))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, message: &str) -> AppResult<()> {
        let email = self.build_message(message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::Notifier(format!("smtp send: {e}")))?;
        Ok(())
    }
}
