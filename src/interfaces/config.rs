use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::application::{AppError, AppResult};
use crate::infrastructure::email_notifier::{DEFAULT_SUBJECT, SmtpSettings};

pub const DEFAULT_COOLDOWN_FILE: &str = "/tmp/last_5xx_alert";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_NOTIFY_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub log_file: PathBuf,
    pub cooldown_file: PathBuf,
    pub throttle_seconds: u64,
    pub poll_interval: Duration,
    pub notify_timeout: Duration,

    // a channel is enabled iff its settings are present
    pub mail: Option<SmtpSettings>,
    pub telegram: Option<TelegramConfig>,
    pub discord: Option<DiscordConfig>,
    pub line: Option<LineConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscordConfig {
    pub webhook_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineConfig {
    pub channel_token: String,
    pub user_id: String,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        let enabled = |key: &str| lookup(key).as_deref() == Some("true");

        let log_file = get("LOG_FILE");
        if log_file.is_empty() {
            return Err(AppError::Config("LOG_FILE is not set".into()));
        }

        let cooldown_file = lookup("COOLDOWN_FILE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_COOLDOWN_FILE.to_string());

        let mail = enabled("ENABLE_MAIL").then(|| SmtpSettings {
            host: get("MAIL_HOST"),
            port: parse_or(&lookup, "MAIL_PORT", DEFAULT_SMTP_PORT),
            username: get("MAIL_USERNAME"),
            password: get("MAIL_PASSWORD"),
            from: get("MAIL_FROM"),
            to: get("MAIL_TO"),
            subject: lookup("MAIL_SUBJECT")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        });

        let telegram = enabled("ENABLE_TELEGRAM").then(|| TelegramConfig {
            bot_token: get("TELEGRAM_BOT_TOKEN"),
            chat_id: get("TELEGRAM_CHAT_ID"),
        });

        let discord = enabled("ENABLE_DISCORD").then(|| DiscordConfig {
            webhook_url: get("DISCORD_WEBHOOK_URL"),
        });

        let line = enabled("ENABLE_LINE").then(|| LineConfig {
            channel_token: get("LINE_CHANNEL_TOKEN"),
            user_id: get("LINE_USER_ID"),
        });

        Ok(Self {
            log_file: PathBuf::from(log_file),
            cooldown_file: PathBuf::from(cooldown_file),
            throttle_seconds: parse_or(&lookup, "THROTTLE_SECONDS", 0),
            poll_interval: Duration::from_millis(parse_or(
                &lookup,
                "POLL_INTERVAL_MS",
                DEFAULT_POLL_INTERVAL_MS,
            )),
            notify_timeout: Duration::from_secs(parse_or(
                &lookup,
                "NOTIFY_TIMEOUT_SECONDS",
                DEFAULT_NOTIFY_TIMEOUT_SECONDS,
            )),
            mail,
            telegram,
            discord,
            line,
        })
    }

    pub fn enabled_channels(&self) -> Vec<&'static str> {
        let mut out = vec![];
        if self.mail.is_some() {
            out.push("email");
        }
        if self.telegram.is_some() {
            out.push("telegram");
        }
        if self.discord.is_some() {
            out.push("discord");
        }
        if self.line.is_some() {
            out.push("line");
        }
        out
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = raw, default = %default, "unparseable value, using default");
            default
        }),
    }
}
