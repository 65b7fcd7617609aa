#[cfg(unix)]
use tokio::signal::unix::{self, SignalKind};
use {
    crate::{
        arguments::Arguments,
        domain::Auctioneer,
        infra::{self, sink::TracingSink},
        run_loop::RunLoop,
    },
    clap::Parser,
    observe::metrics::LivenessChecking,
    std::{
        sync::{Arc, RwLock},
        time::{Duration, Instant},
    },
};

/// Entrypoint for the auctioneer. Sets up tracing and metrics, then runs
/// the service until a shutdown signal arrives.
pub async fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    let mut obs_config = observe::Config::default()
        .with_env_filter(&args.log_filter)
        .with_stderr_threshold(args.log_stderr_threshold);
    if args.use_json_logs {
        obs_config = obs_config.with_json_format();
    }
    observe::tracing::initialize(&obs_config);
    observe::metrics::setup_registry(Some("auctioneer".into()), None);
    tracing::info!("running auctioneer with validated arguments:\n{}", args);
    run(args).await;
}

/// Assumes tracing and metrics registries have already been set up.
pub async fn run(args: Arguments) {
    let config = infra::config::file::load(&args.config).await;
    tracing::info!(?config, "loaded configuration");

    let liveness = Arc::new(Liveness::new(args.max_tick_age));
    observe::metrics::serve_metrics(liveness.clone(), args.metrics_address);

    let auctioneer = Auctioneer::new(config.auctioneer);
    let run_loop = RunLoop::new(
        auctioneer,
        Arc::new(TracingSink),
        config.tick_interval,
        liveness,
    );

    tokio::select! {
        _ = run_loop.run_forever() => unreachable!(),
        _ = shutdown_signal() => {
            tracing::info!("received shutdown signal, exiting");
        }
    };
}

/// The run loop reports a tick after every pass over the auctions. The
/// service is alive while those reports keep coming.
pub struct Liveness {
    max_tick_age: Duration,
    last_tick: RwLock<Instant>,
}

#[async_trait::async_trait]
impl LivenessChecking for Liveness {
    async fn is_alive(&self) -> bool {
        let last_tick = *self.last_tick.read().unwrap();
        last_tick.elapsed() <= self.max_tick_age
    }
}

impl Liveness {
    pub fn new(max_tick_age: Duration) -> Liveness {
        Liveness {
            max_tick_age,
            last_tick: RwLock::new(Instant::now()),
        }
    }

    pub fn tick(&self) {
        *self.last_tick.write().unwrap() = Instant::now();
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    // Intercept main signals for graceful shutdown.
    // Kubernetes sends sigterm, whereas locally sigint (ctrl-c) is most common.
    let mut interrupt = unix::signal(SignalKind::interrupt()).unwrap();
    let mut terminate = unix::signal(SignalKind::terminate()).unwrap();
    tokio::select! {
        _ = interrupt.recv() => (),
        _ = terminate.recv() => (),
    };
}

#[cfg(windows)]
async fn shutdown_signal() {
    // We don't support signal handling on Windows.
    std::future::pending().await
}
