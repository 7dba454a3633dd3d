use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use interface::{FetchError, InstrumentInfo, PriceBar, ProviderId, QuoteData};

use super::YahooClient;
use crate::QuoteProvider;

const RANGE: &str = "2d";
const INTERVAL: &str = "1d";
const BARS: usize = 2;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    // chartPreviousClose is the close before the whole range, not the prior
    // session, so it is deliberately not read here.
    previous_close: Option<f64>,
    short_name: Option<String>,
    long_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl ChartResult {
    fn into_quote_data(self) -> QuoteData {
        let closes = self
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        // null closes show up for sessions that are still open or halted
        let mut bars: Vec<PriceBar> = self
            .timestamp
            .iter()
            .zip(closes)
            .filter_map(|(&timestamp, close)| {
                close
                    .filter(|c| c.is_finite())
                    .map(|close| PriceBar { timestamp, close })
            })
            .collect();
        if bars.len() > BARS {
            bars.drain(..bars.len() - BARS);
        }

        QuoteData {
            info: InstrumentInfo {
                currency: self.meta.currency,
                previous_close: self.meta.previous_close.filter(|p| p.is_finite()),
                short_name: self.meta.short_name,
                long_name: self.meta.long_name,
            },
            bars,
        }
    }
}

/// Turn a chart API response into `QuoteData`.
pub(crate) fn parse_chart(symbol: &str, status: u16, body: &str) -> Result<QuoteData, FetchError> {
    let success = (200..300).contains(&status);

    let response: ChartResponse = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) if !success => return Err(FetchError::Status(status)),
        Err(e) => return Err(FetchError::Decode(e)),
    };

    if let Some(err) = response.chart.error {
        if err.code == "Not Found" {
            return Err(FetchError::UnknownSymbol(symbol.to_string()));
        }
        return Err(FetchError::Api {
            code: err.code,
            description: err.description,
        });
    }

    if !success {
        return Err(FetchError::Status(status));
    }

    Ok(response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .map(ChartResult::into_quote_data)
        .unwrap_or_default())
}

#[async_trait]
impl QuoteProvider for YahooClient {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    async fn fetch_quote_data(&self, symbol: &str) -> Result<QuoteData, FetchError> {
        let url = self.chart_url(symbol)?;
        debug!("yahoo chart request: {}", url);

        let response = self
            .http
            .get(url)
            .query(&[("range", RANGE), ("interval", INTERVAL)])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_chart(symbol, status, &body)
    }
}
