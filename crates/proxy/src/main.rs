use std::sync::Arc;

use color_eyre::eyre;
use tracing::info;

use providers::{QuoteProvider, YahooClient};
use quote_proxy::{logger, server, AppState, ProxyConfig, QuoteCache, QuoteService};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // init error reporting
    color_eyre::install()?;

    // .env must be loaded before flags fall back to the environment
    dotenv::dotenv().ok();

    let config = ProxyConfig::from_args()?;

    // init logging
    let _guards = logger::init_tracing(config.log_dir.as_deref())?;

    info!(
        "starting quote proxy: cache {}s, upstream timeout {}s, upstream {}",
        config.cache_ttl.as_secs(),
        config.upstream_timeout.as_secs(),
        config.yahoo_url
    );

    let provider: Arc<dyn QuoteProvider> = Arc::new(YahooClient::with_config(
        config.yahoo_url.clone(),
        config.upstream_timeout,
    )?);

    let quotes = QuoteService::new(provider, QuoteCache::new(config.cache_ttl))
        .with_default_currency(config.default_currency.clone());
    let state = Arc::new(AppState::new(quotes).with_index_symbol(config.index_symbol.clone()));

    server::serve(state, config.addr()).await?;

    Ok(())
}
