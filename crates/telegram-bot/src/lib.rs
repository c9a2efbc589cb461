//! Telegram Bot API client.
//!
//! This crate provides the small slice of the Bot API the relay needs:
//!
//! - Verifying the bot token on connect (`getMe`)
//! - Posting text messages to one chat or channel (`sendMessage`)
//!
//! [`TelegramClient`] implements [`quake_core::Notifier`].
//!
//! # Example
//!
//! ```no_run
//! use telegram_bot::{BotConfig, TelegramClient};
//!
//! # async fn example() -> Result<(), telegram_bot::TelegramError> {
//! let config = BotConfig::new("123456:ABC-DEF", "@quake_alerts");
//! let client = TelegramClient::connect(config).await?;
//!
//! let message = client.send_message("Hello!").await?;
//! println!("Sent message {}", message.message_id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::TelegramClient;
pub use config::{BotConfig, DEFAULT_API_URL};
pub use error::TelegramError;
pub use types::{Chat, Message, SendMessageParams, User};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
