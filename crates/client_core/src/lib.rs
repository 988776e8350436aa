use async_trait::async_trait;
use reqwest::Client;
use shared::domain::Value;
use tracing::debug;

pub mod config;
pub mod error;
pub mod loader;
pub mod render;

pub use config::ClientConfig;
pub use error::{FetchError, FetchErrorKind};
pub use loader::{LoadPhase, ValuesLoader};
pub use render::ValuesView;

/// Anything that can produce the current list of values.
#[async_trait]
pub trait ValuesSource: Send + Sync {
    async fn fetch_values(&self) -> Result<Vec<Value>, FetchError>;
}

/// HTTP client for the values API.
#[derive(Debug, Clone)]
pub struct ValuesClient {
    http: Client,
    config: ClientConfig,
}

impl ValuesClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// One unauthenticated GET of the values collection. No retry, no timeout.
    pub async fn fetch_values(&self) -> Result<Vec<Value>, FetchError> {
        let url = self
            .config
            .values_url()
            .map_err(|source| FetchError::InvalidEndpoint {
                url: self.config.api_base_url.clone(),
                source,
            })?;
        debug!(%url, "fetching values");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = res.bytes().await.map_err(FetchError::Body)?;
        let values: Vec<Value> = serde_json::from_slice(&body)?;
        debug!(count = values.len(), "values response decoded");
        Ok(values)
    }
}

#[async_trait]
impl ValuesSource for ValuesClient {
    async fn fetch_values(&self) -> Result<Vec<Value>, FetchError> {
        ValuesClient::fetch_values(self).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
