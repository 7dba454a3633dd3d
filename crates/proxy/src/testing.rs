use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use interface::{FetchError, InstrumentInfo, PriceBar, ProviderId, QuoteData};
use providers::QuoteProvider;

pub enum Script {
    Data(QuoteData),
    Unknown,
    Fail(String),
}

/// In-memory provider answering from a fixed script and recording every call.
/// Symbols without a script are unknown.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, symbol: &str, script: Script) -> Self {
        self.scripts.lock().unwrap().insert(symbol.to_string(), script);
        self
    }

    pub fn with_closes(self, symbol: &str, previous_close: Option<f64>, closes: &[f64]) -> Self {
        let data = QuoteData {
            info: InstrumentInfo {
                currency: None,
                previous_close,
                short_name: None,
                long_name: None,
            },
            bars: closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PriceBar {
                    timestamp: i as i64,
                    close,
                })
                .collect(),
        };
        self.with(symbol, Script::Data(data))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, symbol: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|s| *s == symbol).count()
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    async fn fetch_quote_data(&self, symbol: &str) -> Result<QuoteData, FetchError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        match self.scripts.lock().unwrap().get(symbol) {
            Some(Script::Data(data)) => Ok(data.clone()),
            Some(Script::Fail(msg)) => Err(FetchError::Other(msg.clone())),
            Some(Script::Unknown) | None => Err(FetchError::UnknownSymbol(symbol.to_string())),
        }
    }
}
