mod envelope;
mod error;
mod model;

pub use envelope::{BulkEntry, Chart, ChartMeta, ChartResult, QuoteEnvelope};
pub use error::FetchError;
pub use model::{InstrumentInfo, PriceBar, ProviderId, Quote, QuoteData};
