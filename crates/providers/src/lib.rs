use async_trait::async_trait;

use interface::{FetchError, ProviderId, QuoteData};

pub mod yahoo;

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Instrument metadata plus the two most recent daily bars for `symbol`.
    /// An empty `bars` means the provider knows the symbol but has no prices;
    /// an unrecognised symbol is `FetchError::UnknownSymbol`.
    async fn fetch_quote_data(&self, symbol: &str) -> Result<QuoteData, FetchError>;
}

// Convenience re-exports
pub use yahoo::YahooClient;
