use std::sync::Arc;

use crate::application::usecases::{AlertDispatcher, DispatchOutcome};
use crate::application::{AppResult, Clock, LineSource};
use crate::domain::is_server_error;

pub struct WatchLogUseCase {
    pub source: Box<dyn LineSource>,
    pub dispatcher: AlertDispatcher,
    pub clock: Arc<dyn Clock>,
}

impl WatchLogUseCase {
    /// Runs until the line source fails; the file tailer never does after startup.
    pub async fn run(&mut self) -> AppResult<()> {
        loop {
            let line = self.source.next_line().await?;
            let now = self.clock.now();
            // sends stay detached, the loop goes straight back to tailing
            drop(self.handle_line(&line, now).await);
        }
    }

    /// One loop iteration; `None` when the line is not a server error.
    pub async fn handle_line(&mut self, line: &str, now: i64) -> Option<DispatchOutcome> {
        if !is_server_error(line) {
            return None;
        }
        Some(self.dispatcher.maybe_dispatch(line, now).await)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::application::{AlertFanOut, AppError};
    use crate::domain::ThrottlePolicy;
    use crate::infrastructure::memory_store::InMemoryCooldownStore;

    struct ScriptedSource {
        lines: VecDeque<String>,
    }

    #[async_trait]
    impl LineSource for ScriptedSource {
        async fn next_line(&mut self) -> AppResult<String> {
            self.lines
                .pop_front()
                .ok_or_else(|| AppError::Source("script exhausted".into()))
        }
    }

    struct TickingClock(AtomicI64);

    impl Clock for TickingClock {
        fn now(&self) -> i64 {
            self.0.fetch_add(10, Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct CountingFanOut {
        sent: Mutex<Vec<String>>,
    }

    impl AlertFanOut for CountingFanOut {
        fn channel_count(&self) -> usize {
            1
        }

        fn fan_out(&self, message: &str) -> Vec<JoinHandle<()>> {
            self.sent.lock().unwrap().push(message.to_string());
            vec![]
        }
    }

    async fn use_case(lines: &[&str], throttle: u64, fan_out: Arc<CountingFanOut>) -> WatchLogUseCase {
        let dispatcher = AlertDispatcher::restore(
            Arc::new(InMemoryCooldownStore::new()),
            fan_out,
            ThrottlePolicy::new(throttle),
        )
        .await;
        WatchLogUseCase {
            source: Box::new(ScriptedSource {
                lines: lines.iter().map(|l| l.to_string()).collect(),
            }),
            dispatcher,
            clock: Arc::new(TickingClock(AtomicI64::new(1_000))),
        }
    }

    #[tokio::test]
    async fn non_matching_lines_never_reach_dispatcher() {
        let fan_out = Arc::new(CountingFanOut::default());
        let mut uc = use_case(&[], 0, fan_out.clone()).await;

        assert!(uc.handle_line("GET / 200 3ms", 0).await.is_none());
        assert!(uc.handle_line("code=503x", 0).await.is_none());
        assert_eq!(uc.dispatcher.last_alert(), 0);
        assert!(fan_out.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_feeds_matching_lines_to_dispatcher() {
        let fan_out = Arc::new(CountingFanOut::default());
        let mut uc = use_case(
            &["GET / 200", "GET / 500", "GET / 301", "GET / 502"],
            0,
            fan_out.clone(),
        )
        .await;

        // the scripted source ends the loop once it runs dry
        assert!(uc.run().await.is_err());
        assert_eq!(*fan_out.sent.lock().unwrap(), vec!["GET / 500", "GET / 502"]);
    }

    #[tokio::test]
    async fn run_applies_throttle_with_clock_time() {
        let fan_out = Arc::new(CountingFanOut::default());
        // clock advances 10s per line: 1000, 1010, 1020, 1030
        let mut uc = use_case(
            &["a 500 b", "a 501 b", "a 502 b", "a 503 b"],
            25,
            fan_out.clone(),
        )
        .await;

        let _ = uc.run().await;
        assert_eq!(*fan_out.sent.lock().unwrap(), vec!["a 500 b", "a 503 b"]);
        assert_eq!(uc.dispatcher.last_alert(), 1_030);
    }
}
