//! Bot API HTTP client.

use std::sync::Arc;

use quake_core::{async_trait, Notifier, NotifyError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BotConfig;
use crate::error::TelegramError;
use crate::types::{ApiResponse, Message, SendMessageParams, User};

/// Client for posting messages to one Telegram chat.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    config: BotConfig,
    me: Arc<User>,
}

impl TelegramClient {
    /// Connect to the Bot API, verifying the token with `getMe`.
    pub async fn connect(config: BotConfig) -> Result<Self, TelegramError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(TelegramError::Http)?;

        let me: User = api_call::<(), _>(&http, &config, "getMe", None).await?;
        if !me.is_bot {
            return Err(TelegramError::Config(format!(
                "token belongs to user {} which is not a bot",
                me.id
            )));
        }

        info!(
            "Successfully authenticated as {}",
            me.username.as_deref().unwrap_or(&me.first_name)
        );

        Ok(Self {
            http,
            config,
            me: Arc::new(me),
        })
    }

    /// The bot account this client is authenticated as.
    pub fn me(&self) -> &User {
        &self.me
    }

    /// Send a text message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<Message, TelegramError> {
        let mut params = SendMessageParams::text(&self.config.chat_id, text);
        if !self.config.link_previews {
            params = params.without_preview();
        }
        self.send(params).await
    }

    /// Send a message with full parameters.
    pub async fn send(&self, params: SendMessageParams) -> Result<Message, TelegramError> {
        let chat_id = params.chat_id.clone();
        let message: Message =
            api_call(&self.http, &self.config, "sendMessage", Some(params)).await?;
        info!(
            message_id = message.message_id,
            "message sent to channel - [{}]", chat_id
        );
        Ok(message)
    }

    /// Get the configuration.
    pub fn config(&self) -> &BotConfig {
        &self.config
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        self.send_message(message)
            .await
            .map(|_| ())
            .map_err(NotifyError::from)
    }

    fn name(&self) -> &str {
        "Telegram"
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("config", &self.config)
            .field("bot", &self.me.username)
            .finish()
    }
}

/// Make a Bot API call and unwrap the response envelope.
async fn api_call<P: Serialize, R: for<'de> Deserialize<'de>>(
    http: &Client,
    config: &BotConfig,
    method: &str,
    params: Option<P>,
) -> Result<R, TelegramError> {
    debug!("Bot API call: {}", method);

    let mut request = http.post(config.method_url(method));
    if let Some(ref params) = params {
        request = request.json(params);
    }

    // Strip the URL from transport errors so the token never reaches the logs.
    let response = request
        .send()
        .await
        .map_err(|e| TelegramError::Http(e.without_url()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TelegramError::Http(e.without_url()))?;

    let api_response: ApiResponse<R> = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(TelegramError::Connection(format!("HTTP {}: {}", status, body)));
        }
        Err(e) => return Err(TelegramError::Json(e)),
    };

    if !api_response.ok {
        return Err(TelegramError::Api {
            code: api_response
                .error_code
                .unwrap_or_else(|| i32::from(status.as_u16())),
            description: api_response
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }

    api_response.result.ok_or_else(|| TelegramError::Api {
        code: -1,
        description: "No result in response".to_string(),
    })
}
