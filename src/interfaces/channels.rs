use std::sync::Arc;

use crate::application::{AppResult, Notifier};
use crate::infrastructure::{
    email_notifier::EmailNotifier, line_notifier::LinePushNotifier,
    telegram_notifier::TelegramNotifier, webhook_notifier::WebhookNotifier,
};
use crate::interfaces::config::Config;

/// Build one notifier per enabled channel; disabled channels are never constructed.
pub fn build_notifiers(cfg: &Config) -> AppResult<Vec<Arc<dyn Notifier>>> {
    let mut notifiers: Vec<Arc<dyn Notifier>> = vec![];

    if let Some(mail) = &cfg.mail {
        notifiers.push(Arc::new(EmailNotifier::new(mail.clone(), cfg.notify_timeout)?));
    }
    if let Some(tg) = &cfg.telegram {
        notifiers.push(Arc::new(TelegramNotifier::new(
            tg.bot_token.clone(),
            tg.chat_id.clone(),
            cfg.notify_timeout,
        )?));
    }
    if let Some(discord) = &cfg.discord {
        notifiers.push(Arc::new(WebhookNotifier::new(
            discord.webhook_url.clone(),
            cfg.notify_timeout,
        )?));
    }
    if let Some(line) = &cfg.line {
        notifiers.push(Arc::new(LinePushNotifier::new(
            line.channel_token.clone(),
            line.user_id.clone(),
            cfg.notify_timeout,
        )?));
    }

    Ok(notifiers)
}
