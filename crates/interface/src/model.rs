use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    Yahoo,
}

/// One daily bar. Only the close is consumed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: i64,
    pub close: f64,
}

/// Instrument metadata as reported by the provider. Every field is optional
/// upstream; defaults are applied during normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    pub currency: Option<String>,
    pub previous_close: Option<f64>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

/// Raw result of a single provider fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    pub info: InstrumentInfo,
    /// Oldest first, at most the two most recent daily bars.
    pub bars: Vec<PriceBar>,
}

impl QuoteData {
    pub fn latest_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    pub fn prior_close(&self) -> Option<f64> {
        self.bars.iter().rev().nth(1).map(|b| b.close)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub currency: String,
    pub price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_ratio: f64, // 0.01 == 1%
    pub market_time: i64,  // unix seconds
    pub short_name: String,
    pub long_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closes_from_bars() {
        let data = QuoteData {
            info: InstrumentInfo::default(),
            bars: vec![
                PriceBar { timestamp: 1, close: 10.0 },
                PriceBar { timestamp: 2, close: 12.5 },
            ],
        };
        assert_eq!(data.latest_close(), Some(12.5));
        assert_eq!(data.prior_close(), Some(10.0));
    }

    #[test]
    fn test_closes_single_bar() {
        let data = QuoteData {
            info: InstrumentInfo::default(),
            bars: vec![PriceBar { timestamp: 1, close: 7.0 }],
        };
        assert_eq!(data.latest_close(), Some(7.0));
        assert_eq!(data.prior_close(), None);
        assert_eq!(QuoteData::default().latest_close(), None);
    }
}
