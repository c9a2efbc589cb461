//! Configuration types for telegram-bot.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Default Bot API server.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Configuration for a bot posting to one chat.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Base URL of the Bot API server.
    pub api_url: String,
    /// Target chat: numeric id or `@channelusername`.
    pub chat_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether link previews are shown under alerts.
    pub link_previews: bool,
    /// Bot token issued by BotFather.
    token: SecretString,
}

impl BotConfig {
    /// Create a new configuration for the default API server.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            chat_id: chat_id.into(),
            timeout: Duration::from_secs(30),
            link_previews: false,
            token: SecretString::from(token.into()),
        }
    }

    /// Builder method to set the API server URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method to enable link previews.
    pub fn with_link_previews(mut self, enabled: bool) -> Self {
        self.link_previews = enabled;
        self
    }

    /// Get the URL for a Bot API method.
    ///
    /// The result embeds the token and must not be logged.
    pub(crate) fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url,
            self.token.expose_secret(),
            method
        )
    }
}
