pub mod clock;
pub mod email_notifier;
pub mod file_cooldown_store;
pub mod http;
pub mod line_notifier;
pub mod log_tailer;
pub mod memory_store;
pub mod multi_notifier;
pub mod telegram_notifier;
pub mod webhook_notifier;
