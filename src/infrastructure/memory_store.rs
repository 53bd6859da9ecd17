use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::{AppError, AppResult, CooldownStore};

/// Cooldown kept in process memory; clones share the same value.
#[derive(Clone, Default)]
pub struct InMemoryCooldownStore {
    inner: Arc<Mutex<Option<i64>>>,
}

impl InMemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(epoch_seconds: i64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(epoch_seconds))),
        }
    }
}

#[async_trait]
impl CooldownStore for InMemoryCooldownStore {
    async fn load(&self) -> AppResult<Option<i64>> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        Ok(*inner)
    }

    async fn save(&self, epoch_seconds: i64) -> AppResult<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| AppError::Storage("lock poisoned".into()))?;
        *inner = Some(epoch_seconds);
        Ok(())
    }
}
