use std::time::Duration;

use crate::application::{AppError, AppResult};

/// Shared shape of every outbound HTTP client: one request may not outlive `timeout`.
pub fn client_with_timeout(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Config(format!("http client: {e}")))
}

pub(crate) fn notifier_err(e: reqwest::Error) -> AppError {
    AppError::Notifier(e.to_string())
}
