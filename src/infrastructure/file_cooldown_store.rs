use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::application::{AppError, AppResult, CooldownStore};

/// Last-alert timestamp as a decimal string in a single file.
pub struct FileCooldownStore {
    path: PathBuf,
}

impl FileCooldownStore {
    /// path example: "/tmp/last_5xx_alert"
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CooldownStore for FileCooldownStore {
    async fn load(&self) -> AppResult<Option<i64>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Storage(format!("{}: {e}", self.path.display()))),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<i64>()
            .map(Some)
            .map_err(|e| AppError::Storage(format!("{}: {e}", self.path.display())))
    }

    async fn save(&self, epoch_seconds: i64) -> AppResult<()> {
        // flushed to disk before the rename, so a crash leaves either the old or the new value
        let tmp = self.tmp_path();
        let tmp_err = |e: std::io::Error| AppError::Storage(format!("{}: {e}", tmp.display()));
        let mut file = tokio::fs::File::create(&tmp).await.map_err(tmp_err)?;
        file.write_all(epoch_seconds.to_string().as_bytes())
            .await
            .map_err(tmp_err)?;
        file.sync_all().await.map_err(tmp_err)?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::Storage(format!("{}: {e}", self.path.display())))?;
        Ok(())
    }
}
