use crate::error::LoadError;
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Relative path of the listings collection under the API base
pub const PROPERTIES_PATH: &str = "properties/";

/// Listings API client
pub struct HttpPropertySource {
    client: Client,
    url: String,
}

impl HttpPropertySource {
    /// Create a source reading `<api_base>/properties/`.
    ///
    /// Without `timeout` the request waits as long as the server does.
    pub fn new(api_base: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("property237/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: collection_url(api_base),
        })
    }
}

fn collection_url(api_base: &str) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), PROPERTIES_PATH)
}

#[async_trait]
impl PropertySource for HttpPropertySource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        info!("Fetching listings from {}", self.url);

        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            warn!("Listings API returned status: {}", response.status());
            return Err(LoadError::Status(response.status()));
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes of JSON", body.len());

        Ok(serde_json::from_str(&body)?)
    }

    fn source_name(&self) -> &'static str {
        "Property237 API"
    }
}
