pub mod cache;
pub mod config;
pub mod logger;
pub mod quote;
pub mod server;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{CacheEntry, QuoteCache};
pub use config::ProxyConfig;
pub use server::AppState;
pub use service::{QuoteError, QuoteService};
