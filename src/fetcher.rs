use crate::error::FetchError;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use url::Url;

/// Retrieves the raw bytes behind a remote location.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, location: &Url, timeout: Duration) -> Result<Bytes, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, location: &Url, timeout: Duration) -> Result<Bytes, FetchError> {
        let to_fetch_error = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(timeout)
            } else {
                FetchError::Transport(e.to_string())
            }
        };

        let response = self
            .client
            .get(location.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(to_fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.bytes().await.map_err(to_fetch_error)
    }
}
