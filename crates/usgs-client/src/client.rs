//! Event service HTTP client.

use quake_core::{async_trait, EventQuery, EventSource, FetchError, SeismicEvent};
use reqwest::Client;
use tracing::{debug, info};

use crate::config::UsgsConfig;
use crate::error::UsgsError;
use crate::types::FeatureCollection;

/// Client for the USGS FDSN event query service.
#[derive(Clone)]
pub struct UsgsClient {
    http: Client,
    config: UsgsConfig,
}

impl UsgsClient {
    /// Create a new client.
    pub fn new(config: UsgsConfig) -> Result<Self, UsgsError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("quake-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UsgsError::Http)?;

        Ok(Self { http, config })
    }

    /// Query the service and return the raw feature collection.
    pub async fn query(&self, query: &EventQuery) -> Result<FeatureCollection, UsgsError> {
        let url = self.config.query_url(query)?;
        info!("Sending request to {}", url);

        let response = self.http.get(url).send().await.map_err(UsgsError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UsgsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(UsgsError::Http)?;
        let collection: FeatureCollection = serde_json::from_str(&body)?;

        info!(
            "Received from request - {} elements",
            collection.metadata.count
        );
        debug!(features = collection.features.len(), "Parsed feature collection");

        Ok(collection)
    }

    /// Query the service and convert the well-formed features into events.
    pub async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<SeismicEvent>, UsgsError> {
        Ok(self.query(query).await?.into_events())
    }

    /// Get the configuration.
    pub fn config(&self) -> &UsgsConfig {
        &self.config
    }
}

#[async_trait]
impl EventSource for UsgsClient {
    async fn fetch(&self, query: &EventQuery) -> Result<Vec<SeismicEvent>, FetchError> {
        self.fetch_events(query).await.map_err(FetchError::from)
    }

    fn name(&self) -> &str {
        "USGS"
    }
}

impl std::fmt::Debug for UsgsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsgsClient")
            .field("config", &self.config)
            .finish()
    }
}
