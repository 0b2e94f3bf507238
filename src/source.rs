use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::FetchError;

/// Resolves a URL into a parsed JSON document. Holds no state between calls.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// Plain HTTP GET source. No retries and no caching; every call hits the network.
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    http: Client,
}

impl HttpDataSource {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self { http: Client::builder().build()? })
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // Read the body first so malformed JSON surfaces as a parse failure
        // rather than a transport one.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
