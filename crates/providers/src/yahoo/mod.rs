use std::time::Duration;

use reqwest::Url;

use interface::FetchError;

pub mod chart;

pub const BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Yahoo rejects requests without a browser-looking agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Yahoo Finance chart API client.
#[derive(Clone)]
pub struct YahooClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
}

impl YahooClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(BASE_URL, DEFAULT_TIMEOUT)
    }

    /// `timeout` bounds the whole request, connect through body.
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// `{base}/v8/finance/chart/{symbol}` with the symbol escaped as a single
    /// path segment.
    pub(crate) fn chart_url(&self, symbol: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Other(format!("invalid base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Other(format!("base url cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }
}
