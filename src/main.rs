use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use logpulse::application::AlertFanOut;
use logpulse::application::usecases::{AlertDispatcher, WatchLogUseCase};
use logpulse::domain::ThrottlePolicy;
use logpulse::infrastructure::{
    clock::SystemClock, file_cooldown_store::FileCooldownStore, log_tailer::FileLineSource,
    multi_notifier::MultiNotifier,
};
use logpulse::interfaces::{channels::build_notifiers, config::Config};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("logpulse=info".parse().unwrap()),
        )
        .init();
    let _ = dotenvy::dotenv();

    // 1) load config
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    // 2) build infra
    let notifiers = match build_notifiers(&cfg) {
        Ok(n) => n,
        Err(e) => {
            tracing::error!("Invalid channel settings: {e}");
            std::process::exit(1);
        }
    };
    let fan_out = MultiNotifier::new(notifiers);
    if fan_out.channel_count() == 0 {
        tracing::warn!("no notification channels enabled, alerts go to stdout only");
    } else {
        tracing::info!(channels = ?fan_out.channel_names(), "notification channels enabled");
    }

    let store = FileCooldownStore::new(&cfg.cooldown_file);

    let source = match FileLineSource::open(&cfg.log_file, cfg.poll_interval).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open log file: {e}");
            std::process::exit(1);
        }
    };

    // 3) usecases
    let dispatcher = AlertDispatcher::restore(
        Arc::new(store),
        Arc::new(fan_out),
        ThrottlePolicy::new(cfg.throttle_seconds),
    )
    .await;
    let mut watch = WatchLogUseCase {
        source: Box::new(source),
        dispatcher,
        clock: Arc::new(SystemClock),
    };

    // 4) run
    if let Err(e) = watch.run().await {
        tracing::error!("Watch loop stopped: {e}");
        std::process::exit(1);
    }
}
