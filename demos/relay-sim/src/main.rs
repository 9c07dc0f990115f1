//! relay-sim: several Deathlink participants on one in-process hub.
//!
//! ```text
//! relay-sim [config.json]
//! ```
//!
//! Without a config file the defaults in [`SimConfig`] are used. Set
//! `RUST_LOG=debug` to see every announcement.

mod config;
mod sim;

use deathlink::LoggingError;

pub use config::SimConfig;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

#[tokio::main]
async fn main() -> Result<(), SimError> {
    deathlink::logging::init("info")?;

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let report = sim::run(config).await;
    tracing::info!(
        ticks = report.ticks,
        natural = report.natural_deaths,
        forced = report.forced_deaths,
        sent = report.deaths_sent,
        announcements = report.announcements,
        delivered = report.hub.delivered,
        lost = report.hub.lost,
        "simulation finished"
    );
    Ok(())
}
