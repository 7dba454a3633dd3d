use serde::{Deserialize, Serialize};

use crate::Quote;

/// `{"chart": {"result": [{"meta": {...}}], "error": null}}`
///
/// The single-symbol form carries an explicit `"error": null`; the per-symbol
/// entries of a bulk response leave the key out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteEnvelope {
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub result: Vec<ChartResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub currency: String,
    pub symbol: String,
    pub regular_market_price: f64,
    pub previous_close: f64,
    pub regular_market_change: f64,
    /// Fractional ratio despite the key name (0.01 == 1%).
    pub regular_market_change_percent: f64,
    pub regular_market_time: i64,
    pub short_name: String,
    pub long_name: String,
}

impl From<&Quote> for ChartMeta {
    fn from(q: &Quote) -> Self {
        Self {
            currency: q.currency.clone(),
            symbol: q.symbol.clone(),
            regular_market_price: q.price,
            previous_close: q.previous_close,
            regular_market_change: q.change,
            regular_market_change_percent: q.change_ratio,
            regular_market_time: q.market_time,
            short_name: q.short_name.clone(),
            long_name: q.long_name.clone(),
        }
    }
}

impl QuoteEnvelope {
    pub fn single(quote: &Quote) -> Self {
        Self {
            chart: Chart {
                result: vec![ChartResult { meta: quote.into() }],
                error: Some(serde_json::Value::Null),
            },
        }
    }

    pub fn bulk(quote: &Quote) -> Self {
        Self {
            chart: Chart {
                result: vec![ChartResult { meta: quote.into() }],
                error: None,
            },
        }
    }
}

/// Value of one key in a bulk response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulkEntry {
    Quote(QuoteEnvelope),
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_quote() -> Quote {
        Quote {
            symbol: "TCS.NS".to_string(),
            currency: "INR".to_string(),
            price: 110.0,
            previous_close: 100.0,
            change: 10.0,
            change_ratio: 0.1,
            market_time: 1_700_000_000,
            short_name: "TCS".to_string(),
            long_name: "Tata Consultancy Services Limited".to_string(),
        }
    }

    #[test]
    fn test_single_envelope_shape() {
        let value = serde_json::to_value(QuoteEnvelope::single(&sample_quote())).unwrap();
        assert_eq!(
            value,
            json!({
                "chart": {
                    "result": [{
                        "meta": {
                            "currency": "INR",
                            "symbol": "TCS.NS",
                            "regularMarketPrice": 110.0,
                            "previousClose": 100.0,
                            "regularMarketChange": 10.0,
                            "regularMarketChangePercent": 0.1,
                            "regularMarketTime": 1_700_000_000,
                            "shortName": "TCS",
                            "longName": "Tata Consultancy Services Limited"
                        }
                    }],
                    "error": null
                }
            })
        );
    }

    #[test]
    fn test_bulk_envelope_omits_error() {
        let value = serde_json::to_value(QuoteEnvelope::bulk(&sample_quote())).unwrap();
        let chart = value["chart"].as_object().unwrap();
        assert!(!chart.contains_key("error"));
        assert_eq!(chart["result"][0]["meta"]["symbol"], "TCS.NS");
    }

    #[test]
    fn test_bulk_entry_error_shape() {
        let entry = BulkEntry::Error {
            error: "No data available for symbol X".to_string(),
        };
        assert_eq!(
            serde_json::to_value(entry).unwrap(),
            json!({ "error": "No data available for symbol X" })
        );
    }
}
