use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::{AlertFanOut, Notifier};

/// One spawned task per channel; a failing or slow channel only affects its own task.
pub struct MultiNotifier {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl MultiNotifier {
    pub fn new(notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    pub fn channel_names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }
}

impl AlertFanOut for MultiNotifier {
    fn channel_count(&self) -> usize {
        self.notifiers.len()
    }

    fn fan_out(&self, message: &str) -> Vec<JoinHandle<()>> {
        let message: Arc<str> = Arc::from(message);

        self.notifiers
            .iter()
            .map(|n| {
                let n = Arc::clone(n);
                let message = Arc::clone(&message);
                tokio::spawn(async move {
                    match n.notify(&message).await {
                        Ok(()) => tracing::info!(channel = n.name(), "alert delivered"),
                        Err(e) => {
                            tracing::error!(channel = n.name(), error = %e, "alert delivery failed")
                        }
                    }
                })
            })
            .collect()
    }
}
