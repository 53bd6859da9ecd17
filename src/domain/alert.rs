use chrono::{DateTime, SecondsFormat, Utc};

/// One qualifying log line, captured at the moment the dispatcher decided to fire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertEvent {
    pub message: String, // trimmed log line
    pub decided_at: i64, // unix seconds
}

impl AlertEvent {
    pub fn new(line: &str, decided_at: i64) -> Self {
        Self {
            message: line.trim().to_string(),
            decided_at,
        }
    }

    /// `[2026-10-18T10:00:00+00:00] ALERT: <line>`
    pub fn record(&self) -> String {
        let ts = DateTime::<Utc>::from_timestamp(self.decided_at, 0)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false))
            .unwrap_or_else(|| self.decided_at.to_string());
        format!("[{}] ALERT: {}", ts, self.message)
    }
}
