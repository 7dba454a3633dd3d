use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use structopt::StructOpt;
use thiserror::Error;

use crate::{cache::DEFAULT_TTL, server::NIFTY_SYMBOL, service::DEFAULT_CURRENCY};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Command line; every flag can also come from the environment (or `.env`).
#[derive(Debug, StructOpt)]
#[structopt(name = "quote-proxy", about = "Caching proxy for Yahoo Finance quotes")]
pub struct Opt {
    /// Address to bind
    #[structopt(long, env = "QUOTE_PROXY_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    /// Port to listen on
    #[structopt(long, env = "QUOTE_PROXY_PORT", default_value = "5000")]
    pub port: u16,
    /// Seconds a fetched quote is served from cache
    #[structopt(long, env = "QUOTE_PROXY_CACHE_SECS", default_value = "60")]
    pub cache_secs: u64,
    /// Upstream request timeout in seconds
    #[structopt(long, env = "QUOTE_PROXY_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,
    /// Yahoo Finance API base url
    #[structopt(long, env = "QUOTE_PROXY_YAHOO_URL", default_value = "https://query1.finance.yahoo.com")]
    pub yahoo_url: String,
    /// Currency reported when the provider omits one
    #[structopt(long, env = "QUOTE_PROXY_DEFAULT_CURRENCY", default_value = "INR")]
    pub default_currency: String,
    /// Symbol served by /api/nifty-data
    #[structopt(long, env = "QUOTE_PROXY_INDEX_SYMBOL", default_value = "^NSEI")]
    pub index_symbol: String,
    /// Also write logs to a daily file in this directory
    #[structopt(long, env = "QUOTE_PROXY_LOG_DIR", parse(from_os_str))]
    pub log_dir: Option<PathBuf>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("port must not be 0")]
    ZeroPort,
    #[error("cache duration must be positive")]
    ZeroCacheDuration,
    #[error("upstream timeout must be positive")]
    ZeroTimeout,
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cache_ttl: Duration,
    pub upstream_timeout: Duration,
    pub yahoo_url: String,
    pub default_currency: String,
    pub index_symbol: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cache_ttl: DEFAULT_TTL,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            yahoo_url: providers::yahoo::BASE_URL.to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            index_symbol: NIFTY_SYMBOL.to_string(),
            log_dir: None,
        }
    }
}

impl ProxyConfig {
    /// Parse process args and environment. Call after `.env` is loaded.
    pub fn from_args() -> Result<Self, ConfigError> {
        Self::try_from(Opt::from_args())
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if self.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroCacheDuration);
        }
        if self.upstream_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.yahoo_url.trim().is_empty() {
            return Err(ConfigError::Empty("yahoo url"));
        }
        if self.default_currency.trim().is_empty() {
            return Err(ConfigError::Empty("default currency"));
        }
        if self.index_symbol.trim().is_empty() {
            return Err(ConfigError::Empty("index symbol"));
        }
        Ok(())
    }
}

impl TryFrom<Opt> for ProxyConfig {
    type Error = ConfigError;

    fn try_from(opt: Opt) -> Result<Self, Self::Error> {
        let config = Self {
            host: opt.host,
            port: opt.port,
            cache_ttl: Duration::from_secs(opt.cache_secs),
            upstream_timeout: Duration::from_secs(opt.timeout_secs),
            yahoo_url: opt.yahoo_url,
            default_currency: opt.default_currency,
            index_symbol: opt.index_symbol,
            log_dir: opt.log_dir,
        };
        config.validate()?;
        Ok(config)
    }
}
