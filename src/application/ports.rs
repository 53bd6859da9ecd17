use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("line source error: {0}")]
    Source(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("notifier error: {0}")]
    Notifier(String),
    #[error("invalid config: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Yield complete, newly appended lines of a text stream.
#[async_trait]
pub trait LineSource: Send {
    /// Suspends until a full line is available; the terminator is stripped.
    async fn next_line(&mut self) -> AppResult<String>;
}

/// Persist the unix timestamp of the last dispatched alert.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    async fn load(&self) -> AppResult<Option<i64>>;
    async fn save(&self, epoch_seconds: i64) -> AppResult<()>;
}

/// Deliver one alert text over one transport.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn notify(&self, message: &str) -> AppResult<()>;
}

/// Wall clock in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Launch one independent send per enabled channel without waiting for any of them.
pub trait AlertFanOut: Send + Sync {
    fn channel_count(&self) -> usize;
    fn fan_out(&self, message: &str) -> Vec<tokio::task::JoinHandle<()>>;
}
