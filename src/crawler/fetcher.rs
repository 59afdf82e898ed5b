//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the HTTP client with the browser-like user agent and timeouts
//! - Passing every request through the throttle gate
//! - Classifying transport failures and non-success statuses
//! - Parsing response bodies into queryable documents

use crate::config::{Config, FetcherConfig, SiteConfig};
use crate::crawler::throttle::Throttle;
use crate::HarvestError;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `site` - Site settings carrying the user agent
/// * `fetcher` - Timeout settings
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::{FetcherConfig, SiteConfig};
/// use catalog_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default(), &FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    site: &SiteConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(site.user_agent.clone())
        .timeout(Duration::from_secs(fetcher.timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages from the target site, one at a time
pub struct Fetcher {
    client: Client,
    throttle: Throttle,
    fetch_count: u64,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.site, &config.fetcher)?;
        Ok(Self::with_client(client, Throttle::new(&config.throttle)))
    }

    /// Creates a fetcher around an existing client and throttle
    pub fn with_client(client: Client, throttle: Throttle) -> Self {
        Self {
            client,
            throttle,
            fetch_count: 0,
        }
    }

    /// The throttle requests pass through
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Number of requests sent so far
    pub fn fetch_count(&self) -> u64 {
        self.fetch_count
    }

    /// Fetches a URL and returns the response body
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Request or body read timed out | `Timeout` |
    /// | Other transport failure | `Http` |
    /// | Non-2xx status | `Status` |
    pub async fn fetch_page(&mut self, url: &str) -> Result<String, HarvestError> {
        self.throttle.acquire().await;
        self.fetch_count += 1;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify_error(url, e))
    }

    /// Fetches a URL and parses the body as an HTML document
    pub async fn fetch_document(&mut self, url: &str) -> Result<Html, HarvestError> {
        let body = self.fetch_page(url).await?;
        Ok(Html::parse_document(&body))
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
