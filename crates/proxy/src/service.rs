use std::{collections::BTreeMap, sync::Arc};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use interface::{BulkEntry, FetchError, Quote, QuoteEnvelope};
use providers::QuoteProvider;

use crate::cache::QuoteCache;
use crate::quote::normalize;

pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("No symbols provided")]
    NoSymbols,
    /// Request could not be decoded, e.g. a path that is not UTF-8.
    #[error("{0}")]
    BadRequest(String),
    #[error("No data available for symbol {0}")]
    NotFound(String),
    #[error("Error fetching data for {symbol}: {source}")]
    Upstream {
        symbol: String,
        #[source]
        source: FetchError,
    },
}

/// Split a comma-separated symbol list, trimming each entry and dropping
/// empty ones. Order and duplicates are kept.
pub fn parse_symbols(raw: Option<&str>) -> Result<Vec<String>, QuoteError> {
    let symbols: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if symbols.is_empty() {
        return Err(QuoteError::NoSymbols);
    }
    Ok(symbols)
}

/// Cache-first quote lookup in front of a `QuoteProvider`.
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    cache: QuoteCache,
    default_currency: String,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>, cache: QuoteCache) -> Self {
        Self {
            provider,
            cache,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub async fn cache_size(&self) -> usize {
        self.cache.size().await
    }

    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        if let Some(entry) = self.cache.get(symbol).await {
            if self.cache.is_valid(entry.fetched_at) {
                debug!("returning cached data for {}", symbol);
                return Ok(entry.quote);
            }
        }

        info!("fetching fresh data for {} from {:?}", symbol, self.provider.id());

        let data = self
            .provider
            .fetch_quote_data(symbol)
            .await
            .map_err(|source| QuoteError::Upstream {
                symbol: symbol.to_string(),
                source,
            })?;

        let quote = normalize(symbol, data, &self.default_currency, Utc::now().timestamp())
            .ok_or_else(|| QuoteError::NotFound(symbol.to_string()))?;

        self.cache.put(symbol, quote.clone()).await;
        Ok(quote)
    }

    /// Look up every symbol in order. A failing symbol becomes an error entry
    /// and does not stop the rest; a repeated symbol keeps its last result.
    pub async fn get_bulk(
        &self,
        symbols: &[String],
    ) -> Result<BTreeMap<String, BulkEntry>, QuoteError> {
        if symbols.is_empty() {
            return Err(QuoteError::NoSymbols);
        }

        let mut results = BTreeMap::new();
        for symbol in symbols {
            let entry = match self.get_quote(symbol).await {
                Ok(quote) => BulkEntry::Quote(QuoteEnvelope::bulk(&quote)),
                Err(e) => {
                    warn!("bulk lookup failed for {}: {}", symbol, e);
                    BulkEntry::Error {
                        error: e.to_string(),
                    }
                }
            };
            results.insert(symbol.clone(), entry);
        }

        info!(
            "bulk lookup done: {} symbols requested, {} distinct",
            symbols.len(),
            results.len()
        );
        Ok(results)
    }
}
