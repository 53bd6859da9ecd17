use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::{AlertFanOut, CooldownStore};
use crate::domain::{AlertEvent, ThrottlePolicy};

#[derive(Debug)]
pub enum DispatchOutcome {
    Suppressed,
    /// `sends` are already running; dropping them leaves the sends detached.
    Dispatched {
        event: AlertEvent,
        sends: Vec<JoinHandle<()>>,
    },
}

impl DispatchOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched { .. })
    }

    /// Wait for every launched send to finish. The watch loop never calls this.
    pub async fn settle(self) {
        if let DispatchOutcome::Dispatched { sends, .. } = self {
            for s in sends {
                let _ = s.await;
            }
        }
    }
}

pub struct AlertDispatcher {
    store: Arc<dyn CooldownStore>,
    fan_out: Arc<dyn AlertFanOut>,
    policy: ThrottlePolicy,
    last_alert: i64,
}

impl AlertDispatcher {
    /// Reads the persisted cooldown once; a missing or unreadable value counts as "never alerted".
    pub async fn restore(
        store: Arc<dyn CooldownStore>,
        fan_out: Arc<dyn AlertFanOut>,
        policy: ThrottlePolicy,
    ) -> Self {
        let last_alert = match store.load().await {
            Ok(Some(ts)) => ts,
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(error = %e, "cooldown unreadable, treating as never alerted");
                0
            }
        };
        tracing::info!(
            last_alert,
            throttle_seconds = policy.throttle_seconds,
            channels = fan_out.channel_count(),
            "dispatcher ready"
        );

        Self {
            store,
            fan_out,
            policy,
            last_alert,
        }
    }

    pub fn last_alert(&self) -> i64 {
        self.last_alert
    }

    pub async fn maybe_dispatch(&mut self, line: &str, now: i64) -> DispatchOutcome {
        if !self.policy.allows(self.last_alert, now) {
            tracing::debug!(now, last_alert = self.last_alert, "alert suppressed by cooldown");
            return DispatchOutcome::Suppressed;
        }

        let event = AlertEvent::new(line, now);
        println!("{}", event.record());
        tracing::warn!(line = %event.message, "server error detected");

        let sends = self.fan_out.fan_out(&event.message);

        // cooldown advances even if every channel later fails
        self.last_alert = now;
        if let Err(e) = self.store.save(now).await {
            tracing::error!(error = %e, "failed to persist cooldown timestamp");
        }

        DispatchOutcome::Dispatched { event, sends }
    }
}
