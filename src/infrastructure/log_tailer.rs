use std::io::SeekFrom;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use crate::application::{AppError, AppResult, LineSource};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Follows a growing file from its end, `tail -f` style.
///
/// Bytes of an unterminated line are held in `pending` across polls, so a slow
/// writer never produces a split or duplicated line. Rotation and truncation are
/// not detected.
pub struct FileLineSource {
    reader: BufReader<File>,
    pending: Vec<u8>,
    poll_interval: Duration,
}

impl FileLineSource {
    pub async fn open(path: impl AsRef<Path>, poll_interval: Duration) -> AppResult<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .await
            .map_err(|e| AppError::Source(format!("open {}: {e}", path.display())))?;
        let offset = file
            .seek(SeekFrom::End(0))
            .await
            .map_err(|e| AppError::Source(format!("seek {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), offset, "tailing log file");

        Ok(Self {
            reader: BufReader::new(file),
            pending: Vec::new(),
            poll_interval,
        })
    }
}

#[async_trait]
impl LineSource for FileLineSource {
    async fn next_line(&mut self) -> AppResult<String> {
        loop {
            match self.reader.read_until(b'\n', &mut self.pending).await {
                Ok(_) if self.pending.ends_with(b"\n") => {
                    let raw = std::mem::take(&mut self.pending);
                    return Ok(decode_line(raw));
                }
                // EOF, possibly with a partial line now sitting in `pending`
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "log read failed, retrying"),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

fn decode_line(mut raw: Vec<u8>) -> String {
    if raw.ends_with(b"\n") {
        raw.pop();
    }
    if raw.ends_with(b"\r") {
        raw.pop();
    }
    match String::from_utf8(raw) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
