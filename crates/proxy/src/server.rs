use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use interface::{BulkEntry, QuoteEnvelope};

use crate::service::{parse_symbols, QuoteError, QuoteService};

pub const NIFTY_SYMBOL: &str = "^NSEI";

pub struct AppState {
    pub quotes: QuoteService,
    /// Symbol served by `/api/nifty-data`.
    pub index_symbol: String,
}

impl AppState {
    pub fn new(quotes: QuoteService) -> Self {
        Self {
            quotes,
            index_symbol: NIFTY_SYMBOL.to_string(),
        }
    }

    pub fn with_index_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.index_symbol = symbol.into();
        self
    }
}

impl QuoteError {
    fn status(&self) -> StatusCode {
        match self {
            QuoteError::NoSymbols | QuoteError::BadRequest(_) => StatusCode::BAD_REQUEST,
            QuoteError::NotFound(_) => StatusCode::NOT_FOUND,
            QuoteError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            error!("{}", message);
        } else {
            warn!("{}", message);
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Path symbol, rejected as a JSON `QuoteError` instead of axum's plain text.
pub struct SymbolPath(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SymbolPath {
    type Rejection = QuoteError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(symbol) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| QuoteError::BadRequest(e.body_text()))?;
        Ok(SymbolPath(symbol))
    }
}

/// First `symbols` value of the query string; repeats are ignored.
pub struct SymbolsQuery(pub Option<String>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SymbolsQuery {
    type Rejection = QuoteError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| QuoteError::BadRequest(e.body_text()))?;
        let symbols = pairs
            .into_iter()
            .find(|(key, _)| key == "symbols")
            .map(|(_, value)| value);
        Ok(SymbolsQuery(symbols))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub cache_size: usize,
}

async fn lookup(state: &AppState, symbol: &str) -> Result<Json<QuoteEnvelope>, QuoteError> {
    let quote = state.quotes.get_quote(symbol).await?;
    Ok(Json(QuoteEnvelope::single(&quote)))
}

async fn quote_handler(
    State(state): State<Arc<AppState>>,
    SymbolPath(symbol): SymbolPath,
) -> Result<Json<QuoteEnvelope>, QuoteError> {
    lookup(&state, &symbol).await
}

async fn bulk_handler(
    State(state): State<Arc<AppState>>,
    SymbolsQuery(raw): SymbolsQuery,
) -> Result<Json<BTreeMap<String, BulkEntry>>, QuoteError> {
    let symbols = parse_symbols(raw.as_deref())?;
    let results = state.quotes.get_bulk(&symbols).await?;
    Ok(Json(results))
}

async fn nifty_handler(State(state): State<Arc<AppState>>) -> Result<Json<QuoteEnvelope>, QuoteError> {
    lookup(&state, &state.index_symbol).await
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        cache_size: state.quotes.cache_size().await,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/nifty-data", get(nifty_handler))
        .route("/api/yahoo-finance/bulk", get(bulk_handler))
        .route("/api/yahoo-finance/:symbol", get(quote_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> eyre::Result<()> {
    let app = router(state);

    info!("quote proxy listening on http://{}", addr);
    info!("available endpoints:");
    info!("- http://{}/api/yahoo-finance/<symbol>", addr);
    info!("- http://{}/api/yahoo-finance/bulk?symbols=SYM1,SYM2", addr);
    info!("- http://{}/api/nifty-data", addr);
    info!("- http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("quote proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
