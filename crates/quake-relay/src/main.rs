use std::sync::Arc;

use quake_relay::{load_env_files, Relay, RelayConfig, Scheduler};
use telegram_bot::TelegramClient;
use tracing::info;
use tracing_subscriber::EnvFilter;
use usgs_client::UsgsClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_files();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env()?;
    info!(
        target_name = config.target.name(),
        point = %config.target.point(),
        max_radius_km = config.target.max_radius_km(),
        min_magnitude = config.target.min_magnitude(),
        lookback_minutes = config.target.lookback_minutes(),
        timezone = %config.target.timezone(),
        "Loaded configuration"
    );

    let notifier = TelegramClient::connect(config.bot).await?;
    let source = UsgsClient::new(config.usgs)?;
    let relay = Relay::new(config.target, Arc::new(source), Arc::new(notifier));

    let handle = Scheduler::new(config.scheduler).start(move || {
        let relay = relay.clone();
        async move { relay.run_cycle().await }
    });

    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down");

    let stats = handle.shutdown().await;
    info!(
        ticks = stats.ticks,
        cycles = stats.started,
        dropped = stats.dropped,
        failed = stats.failed,
        "Relay stopped"
    );

    Ok(())
}
