use interface::{Quote, QuoteData};

/// Build a `Quote` from a provider fetch. `None` when there are no price bars.
///
/// Previous close preference: provider metadata, then the prior bar's close,
/// then the current price itself (zero change).
pub fn normalize(
    symbol: &str,
    data: QuoteData,
    default_currency: &str,
    market_time: i64,
) -> Option<Quote> {
    let price = data.latest_close()?;
    let previous_close = data
        .info
        .previous_close
        .or_else(|| data.prior_close())
        .unwrap_or(price);

    let change = price - previous_close;
    let change_ratio = change_ratio(change, previous_close);

    let info = data.info;
    Some(Quote {
        symbol: symbol.to_string(),
        currency: info.currency.unwrap_or_else(|| default_currency.to_string()),
        price,
        previous_close,
        change,
        change_ratio,
        market_time,
        short_name: info.short_name.unwrap_or_else(|| symbol.to_string()),
        long_name: info.long_name.unwrap_or_else(|| symbol.to_string()),
    })
}

pub fn change_ratio(change: f64, previous_close: f64) -> f64 {
    if previous_close == 0.0 {
        0.0
    } else {
        change / previous_close
    }
}
