use {
    std::{net::SocketAddr, path::PathBuf, time::Duration},
    tracing::Level,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(
        long,
        env,
        default_value = "warn,auctioneer=debug,winner_selection=debug"
    )]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: Level,

    /// Log output as JSON, one event per line.
    #[clap(long, env)]
    pub use_json_logs: bool,

    #[clap(long, env, default_value = "0.0.0.0:9586")]
    pub metrics_address: SocketAddr,

    /// How stale the run loop may get before the liveness probe reports the
    /// service as dead.
    #[clap(long, env, default_value = "30s", value_parser = humantime::parse_duration)]
    pub max_tick_age: Duration,

    /// Path to the TOML configuration file.
    #[clap(long, env)]
    pub config: PathBuf,
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "log_filter: {}", self.log_filter)?;
        writeln!(f, "log_stderr_threshold: {}", self.log_stderr_threshold)?;
        writeln!(f, "use_json_logs: {}", self.use_json_logs)?;
        writeln!(f, "metrics_address: {}", self.metrics_address)?;
        writeln!(f, "max_tick_age: {:?}", self.max_tick_age)?;
        writeln!(f, "config: {}", self.config.display())?;
        Ok(())
    }
}
