use std::time::Duration;

use async_trait::async_trait;
use jita_config::scraper::ScraperConfig;
use jita_core::{Error, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};

/// Where pages and images come from
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch an HTML page as text
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Fetch raw bytes (illustrations)
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// reqwest-backed fetcher that sleeps before every request
pub struct HttpFetcher {
    client: reqwest::Client,
    request_delay: Duration,
    image_delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| Error::parse("accept-language header", e.to_string()))?,
        );

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::network("http client", e))?;

        Ok(Self {
            client,
            request_delay: config.request_delay(),
            image_delay: config.image_delay(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(url, format!("HTTP {status}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        tokio::time::sleep(self.request_delay).await;
        tracing::debug!("GET {}", url);

        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| Error::network(url, e))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tokio::time::sleep(self.image_delay).await;
        tracing::debug!("GET {} (image)", url);

        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| Error::network(url, e))?;

        Ok(bytes.to_vec())
    }
}
