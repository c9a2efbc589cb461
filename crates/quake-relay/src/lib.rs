//! Earthquake alert relay.
//!
//! This crate ties the event source and the notification channel together:
//!
//! - [`run_cycle`] / [`Relay`] - one fetch-evaluate-notify pass over the lookback window
//! - [`Scheduler`] - single-flight interval driver with graceful shutdown
//! - [`RelayConfig`] - environment-based configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use quake_relay::{Relay, RelayConfig, Scheduler};
//! use telegram_bot::TelegramClient;
//! use usgs_client::UsgsClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RelayConfig::from_env()?;
//! let notifier = TelegramClient::connect(config.bot).await?;
//! let source = UsgsClient::new(config.usgs)?;
//! let relay = Relay::new(config.target, Arc::new(source), Arc::new(notifier));
//!
//! let handle = Scheduler::new(config.scheduler).start(move || {
//!     let relay = relay.clone();
//!     async move { relay.run_cycle().await }
//! });
//!
//! tokio::signal::ctrl_c().await?;
//! handle.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cycle;
pub mod scheduler;

pub use config::{load_env_files, RelayConfig, CONFIG_FILE};
pub use cycle::{build_message, run_cycle, CycleError, CyclePhase, CycleReport, Relay};
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerHandle, SchedulerStats};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
